//! Error handling for workflow triggering
//!
//! This module provides the error taxonomy for the trigger pipeline with
//! recovery guidance using the thiserror crate for ergonomic error handling.

use thiserror::Error;

/// Main error type for trigger operations
///
/// Nonzero exits and timeouts of the dispatched command are not errors; they
/// are reported through `ProcessOutcome`. Every variant here aborts the run.
#[derive(Error, Debug)]
pub enum TriggerError {
    // Configuration errors
    #[error("[config] 環境変数 {name} が設定されていません")]
    ConfigMissing { name: String },

    #[error("[config] 設定の読み込みに失敗しました: {message}")]
    ConfigInvalid { message: String },

    // Authentication errors
    #[error("[auth] アクセスコードが一致しません")]
    AuthenticationFailed,

    // Analysis errors
    #[error("[analysis] ログ分析の生成に失敗しました: {message}")]
    AnalysisUnavailable { message: String },

    #[error("[analysis] タイトルまたは本文が空のため実行を中止しました")]
    EmptyAnalysis,

    // Dispatch errors
    #[error("[dispatch] 外部コマンドの起動に失敗しました: {message}")]
    LaunchFailed { message: String },

    #[error("[dispatch] 外部コマンドの終了待機に失敗しました: {message}")]
    WaitFailed { message: String },
}

impl TriggerError {
    /// Check if this error is recoverable within the run
    ///
    /// Only the analysis stage degrades gracefully (fallback content); every
    /// other condition aborts with a nonzero exit.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AnalysisUnavailable { .. })
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::ConfigMissing { .. } => vec![
                "環境変数を設定してください（例: ACCESS_CODE_HASH）",
                "SHA-256ハッシュは16進数で指定してください",
            ],
            Self::ConfigInvalid { .. } => {
                vec![".trigger-config.yamlの構文を確認してください"]
            }
            Self::AuthenticationFailed => vec![
                "アクセスコードを確認してください",
                "ACCESS_CODE_HASHが正しいハッシュか確認してください",
            ],
            Self::AnalysisUnavailable { .. } => vec![
                "ENDPOINT、API_KEY、MODELの設定を確認してください",
                "既定のタイトル・本文で実行は継続されます",
            ],
            Self::EmptyAnalysis => {
                vec!["分析バックエンドの応答を確認してください"]
            }
            Self::LaunchFailed { .. } => vec![
                "ghコマンドがインストールされているか確認してください",
                "PATHの設定を確認してください",
            ],
            Self::WaitFailed { .. } => {
                vec!["コマンドの出力を確認してください"]
            }
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigMissing { .. } => "CONFIG_MISSING",
            Self::ConfigInvalid { .. } => "CONFIG_INVALID",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::AnalysisUnavailable { .. } => "ANALYSIS_UNAVAILABLE",
            Self::EmptyAnalysis => "EMPTY_ANALYSIS",
            Self::LaunchFailed { .. } => "LAUNCH_FAILED",
            Self::WaitFailed { .. } => "WAIT_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_error() {
        let error = TriggerError::ConfigMissing {
            name: "ACCESS_CODE_HASH".to_string(),
        };

        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "CONFIG_MISSING");
        assert!(error.to_string().contains("ACCESS_CODE_HASH"));
        assert!(error.suggested_actions().len() > 0);
    }

    #[test]
    fn test_authentication_failed_error() {
        let error = TriggerError::AuthenticationFailed;

        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "AUTHENTICATION_FAILED");
    }

    #[test]
    fn test_analysis_unavailable_is_recoverable() {
        let error = TriggerError::AnalysisUnavailable {
            message: "connection refused".to_string(),
        };

        assert!(error.is_recoverable());
        assert_eq!(error.code(), "ANALYSIS_UNAVAILABLE");
        let display = error.to_string();
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn test_launch_failed_error() {
        let error = TriggerError::LaunchFailed {
            message: "No such file or directory".to_string(),
        };

        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "LAUNCH_FAILED");
    }

    #[test]
    fn test_error_display_contains_component() {
        let error = TriggerError::EmptyAnalysis;

        let display = format!("{}", error);
        assert!(display.contains("[analysis]"));
    }

    #[test]
    fn test_empty_analysis_suggested_actions() {
        let error = TriggerError::EmptyAnalysis;

        assert!(!error.is_recoverable());
        assert_eq!(error.suggested_actions().len(), 1);
    }
}
