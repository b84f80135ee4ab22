use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            store_path: env::var("STORE_PATH")
                .unwrap_or_else(|_| "addis-metro.json".to_string())
                .into(),
        }
    }
}
