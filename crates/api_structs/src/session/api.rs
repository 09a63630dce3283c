use serde::{Deserialize, Serialize};

pub mod create_session {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub token: String,
    }

    impl APIResponse {
        pub fn new(token: String) -> Self {
            Self { token }
        }
    }
}
