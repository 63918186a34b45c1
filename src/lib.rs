pub mod link;
pub mod net;
pub mod outbound;
pub mod profile;
pub mod transform;
pub mod wire;

pub fn get_version() -> String {
    "0.2.1".to_string()
}
