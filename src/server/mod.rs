//! MCP server for booking intake.
//!
//! This module provides the MCP protocol server that exposes the booking
//! pipeline to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::{BookingMcpServer, RequestCleaningParams};

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the booking MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: BookingMcpServer) -> Result<()> {
    // Serve the server with stdio transport
    let service = server.serve(stdio()).await?;

    // Wait for completion
    service.waiting().await?;

    Ok(())
}
