//! MCP (Model Context Protocol) server for Kilde.
//!
//! Lets AI assistants look up learning resources as a tool.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
