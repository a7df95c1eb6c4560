use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Key handed to the message-lookup collaborator.
    pub message_key: &'static str,
    pub blocks_generation: bool,
}

impl ReportError {
    /// Classify this error by kind, user-facing message key and whether it stops
    /// a generation attempt.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Pre-flight validation
            ReportError::DirectoryNotWritable(_) => ErrorClassification {
                error_type: "DirectoryNotWritable",
                message_key: "reports.dialog.error.dirperms",
                blocks_generation: true,
            },
            ReportError::FileNotWritable(_) => ErrorClassification {
                error_type: "FileNotWritable",
                message_key: "reports.dialog.error.fileperms",
                blocks_generation: true,
            },
            ReportError::NoAlertsMatched => ErrorClassification {
                error_type: "NoAlertsMatched",
                message_key: "reports.dialog.error.noalerts",
                blocks_generation: true,
            },

            // Renderer
            ReportError::GenerationFailed { .. } => ErrorClassification {
                error_type: "GenerationFailed",
                message_key: "reports.dialog.error.generate",
                blocks_generation: true,
            },

            // Logged only
            ReportError::ConfigPersistenceFailed(_) => ErrorClassification {
                error_type: "ConfigPersistenceFailed",
                message_key: "reports.error.config.save",
                blocks_generation: false,
            },

            ReportError::UnknownTemplate(_) => ErrorClassification {
                error_type: "UnknownTemplate",
                message_key: "reports.dialog.error.template",
                blocks_generation: true,
            },
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                message_key: "reports.error.config",
                blocks_generation: true,
            },
            ReportError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                message_key: "reports.error.config",
                blocks_generation: false,
            },
            ReportError::Cancelled => ErrorClassification {
                error_type: "Cancelled",
                message_key: "reports.dialog.cancelled",
                blocks_generation: true,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                message_key: "reports.dialog.error.generate",
                blocks_generation: true,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                message_key: "reports.dialog.error.generate",
                blocks_generation: true,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                message_key: "reports.error.config",
                blocks_generation: true,
            },
            ReportError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                message_key: "reports.dialog.error.generate",
                blocks_generation: true,
            },
        }
    }

    /// Contextual argument for the user-facing message, if the kind carries one.
    pub fn message_arg(&self) -> Option<String> {
        match self {
            ReportError::DirectoryNotWritable(path) | ReportError::FileNotWritable(path) => {
                Some(path.display().to_string())
            }
            ReportError::GenerationFailed { message, .. } => Some(message.clone()),
            ReportError::UnknownTemplate(name) => Some(name.clone()),
            _ => None,
        }
    }

    /// Error type, message key and its argument, e.g.
    /// `DirectoryNotWritable: reports.dialog.error.dirperms [/srv/reports]`.
    pub fn diagnostic(&self) -> String {
        let class = self.classify();
        match self.message_arg() {
            Some(arg) => format!("{}: {} [{}]", class.error_type, class.message_key, arg),
            None => format!("{}: {}", class.error_type, class.message_key),
        }
    }

    /// Process exit code: 2 for configuration, 3 for validation, 4 for generation.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::Config(_) | ReportError::Yaml(_) | ReportError::UnknownTemplate(_) => 2,
            e if e.is_validation() => 3,
            ReportError::GenerationFailed { .. } => 4,
            _ => 1,
        }
    }

    /// True for the pre-flight failures raised before anything is written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReportError::DirectoryNotWritable(_)
                | ReportError::FileNotWritable(_)
                | ReportError::NoAlertsMatched
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dir_not_writable_blocks_with_path() {
        let err = ReportError::DirectoryNotWritable(PathBuf::from("/srv/reports"));
        let class = err.classify();
        assert!(class.blocks_generation);
        assert_eq!(class.message_key, "reports.dialog.error.dirperms");
        assert_eq!(err.message_arg().as_deref(), Some("/srv/reports"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_no_alerts_has_no_arg() {
        let err = ReportError::NoAlertsMatched;
        assert_eq!(err.classify().error_type, "NoAlertsMatched");
        assert!(err.message_arg().is_none());
    }

    #[test]
    fn test_persistence_failure_does_not_block() {
        let err = ReportError::ConfigPersistenceFailed("disk full".into());
        assert!(!err.classify().blocks_generation);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_generation_failed_carries_message() {
        let err = ReportError::GenerationFailed {
            template: "traditional-html".into(),
            message: "template syntax error".into(),
        };
        assert_eq!(err.classify().message_key, "reports.dialog.error.generate");
        assert_eq!(err.message_arg().as_deref(), Some("template syntax error"));
        assert!(err.to_string().contains("traditional-html"));
    }

    #[test]
    fn test_diagnostic_includes_message_arg() {
        let err = ReportError::FileNotWritable(PathBuf::from("/srv/reports/r.html"));
        assert_eq!(
            err.diagnostic(),
            "FileNotWritable: reports.dialog.error.fileperms [/srv/reports/r.html]"
        );
        assert!(!ReportError::NoAlertsMatched.diagnostic().contains('['));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ReportError::Config("bad".into()).exit_code(), 2);
        assert_eq!(ReportError::UnknownTemplate("x".into()).exit_code(), 2);
        assert_eq!(ReportError::NoAlertsMatched.exit_code(), 3);
        let failed = ReportError::GenerationFailed {
            template: "t".into(),
            message: "m".into(),
        };
        assert_eq!(failed.exit_code(), 4);
        assert_eq!(ReportError::Cancelled.exit_code(), 1);
    }
}
