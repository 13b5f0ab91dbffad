pub use std::{
    env,
    fmt::{self, Display},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

pub use tokio::time::{Duration, Interval, interval};

pub use anyhow::{Context, anyhow};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::Getters;
pub use log::{debug, error, info};
pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use serde_json::Value;
