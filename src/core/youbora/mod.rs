pub mod client;
pub mod normalize;
pub mod response;
pub mod signer;
pub mod variant;
