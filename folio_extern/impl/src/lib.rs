pub mod contact_relay;
mod http;
