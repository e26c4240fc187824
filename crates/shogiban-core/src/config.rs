//! 対局ルールの設定（RuleConfig）

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 入玉宣言ルールの種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnteringKingRule {
    /// 入玉ルールなし
    None,
    /// 24点法 (31点以上で宣言勝ち)
    Csa24,
    /// 27点法 = CSAルール (先手28点, 後手27点)
    #[default]
    Csa27,
    /// トライルール（相手玉の初期位置に自玉が到達すれば勝ち）
    TryRule,
}

/// 対局ルールの設定
///
/// TOML からは次の形で読み込む（省略したキーは既定値）。
///
/// ```toml
/// sennichite_count = 4
/// entering_king = "csa27"
/// max_ply = 320
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 千日手が成立する同一局面の出現回数
    pub sennichite_count: u32,
    /// 入玉宣言ルール
    pub entering_king: EnteringKingRule,
    /// 手数制限（到達で引き分け）
    pub max_ply: Option<u16>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self { sennichite_count: 4, entering_king: EnteringKingRule::default(), max_ply: None }
    }
}

impl RuleConfig {
    /// TOML 文字列から読み込む
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let config: RuleConfig = toml::from_str(s)?;
        if config.sennichite_count < 2 {
            log::warn!("sennichite_count {} is below 2; using 2", config.sennichite_count);
            return Ok(RuleConfig { sennichite_count: 2, ..config });
        }
        Ok(config)
    }

    /// TOML ファイルから読み込む
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rule config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse rule config {}", path.display()))?;
        log::debug!("loaded rule config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// TOML 文字列に書き出す
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
