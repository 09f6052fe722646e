pub mod contact_relay;
