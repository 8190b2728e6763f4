use {
    crate::{
        error::{Error, Result},
        stats::BLACK_THRESHOLD,
    },
    std::env,
};

pub const THRESHOLD_KEY: &str = "RENDER_CHECK_THRESHOLD";
pub const CONVERT_TOOL_KEY: &str = "RENDER_CHECK_CONVERT_TOOL";

/// `Config` は環境変数 (と `.env` ファイル) から読み込む実行時設定を表す.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// 各チャンネル平均がこの値未満なら黒とみなす.
    pub threshold: f64,
    /// PNG コーデックが使えないときに呼ぶ外部コマンド.
    pub convert_tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: BLACK_THRESHOLD,
            convert_tool: "convert".to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        #[cfg(feature = "env-file")]
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(THRESHOLD_KEY) {
            config.threshold = match value.trim().parse::<f64>() {
                Ok(t) if t.is_finite() => t,
                _ => {
                    return Err(Error::InvalidConfig {
                        key: THRESHOLD_KEY,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(CONVERT_TOOL_KEY) {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig {
                    key: CONVERT_TOOL_KEY,
                    value,
                });
            }
            config.convert_tool = value;
        }

        Ok(config)
    }
}
