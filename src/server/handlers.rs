//! MCP tool handlers for the booking server.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::dispatcher::{messages, RequestDispatcher};
use crate::domain::{BookingRequest, FieldInput};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

/// The booking MCP server.
#[derive(Clone)]
pub struct BookingMcpServer {
    dispatcher: RequestDispatcher,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for BookingMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "booking-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for cleaning-service bookings - validates a customer's name, phone and address, checks the service area, and forwards accepted requests to the business.".into()),
        }
    }
}

/// Arguments of the `request_cleaning` tool.
///
/// Fields are raw JSON values: anything other than a string is accepted at
/// this boundary and rejected by validation with a readable message.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RequestCleaningParams {
    /// Customer's full name
    #[serde(default)]
    pub name: Option<Value>,
    /// Customer's phone number, any common US format
    #[serde(default)]
    pub phone: Option<Value>,
    /// Street address where the cleaning should happen
    #[serde(default)]
    pub address: Option<Value>,
    /// Identity used for rate limiting; omitted means a shared anonymous bucket
    #[serde(default)]
    pub client_id: Option<String>,
}

impl RequestCleaningParams {
    /// Split into the rate-limit identity and the request, or `None` when a
    /// required field is missing or null.
    fn into_request(self) -> Option<(Option<String>, BookingRequest)> {
        let name = self.name.and_then(FieldInput::from_json)?;
        let phone = self.phone.and_then(FieldInput::from_json)?;
        let address = self.address.and_then(FieldInput::from_json)?;

        Some((
            self.client_id,
            BookingRequest {
                name,
                phone,
                address,
            },
        ))
    }
}

// Tool router implementation
#[tool_router]
impl BookingMcpServer {
    /// Create a new booking MCP server around a dispatcher.
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }

    /// Handle one `request_cleaning` call.
    ///
    /// Declines and failures come back as tool results flagged as errors,
    /// never as protocol errors.
    pub async fn handle_request(&self, params: RequestCleaningParams) -> CallToolResult {
        let Some((client_id, request)) = params.into_request() else {
            tracing::info!("request_cleaning called with missing fields");
            return CallToolResult::error(vec![Content::text(messages::MISSING_FIELDS)]);
        };

        let response = self
            .dispatcher
            .dispatch(client_id.as_deref(), request)
            .await;

        tracing::debug!(stage = %response.stage, "request_cleaning finished");

        let content = vec![Content::text(response.message.clone())];
        if response.is_success() {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        }
    }

    /// Request a home cleaning appointment.
    #[tool(
        description = "Request a home cleaning appointment. Provide the customer's name, phone number, and service address. Returns a confirmation, a polite decline if the address is outside the service area, or a message explaining what to fix."
    )]
    async fn request_cleaning(
        &self,
        params: Parameters<RequestCleaningParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: request_cleaning called");
        Ok(self.handle_request(params.0).await)
    }
}
