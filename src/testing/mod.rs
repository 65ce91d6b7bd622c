//! Test doubles for exercising the client without a live backend.

pub mod mock_remote;

pub use mock_remote::MockRemote;
