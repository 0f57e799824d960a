use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// PDF 读取/提取错误
    Pdf(PdfError),
    /// 文件操作错误
    File(FileError),
    /// 模式模型错误
    Model(ModelError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Pdf(e) => write!(f, "PDF错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Model(e) => write!(f, "模型错误: {}", e),
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Pdf(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Model(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// PDF 读取/提取错误
#[derive(Debug)]
pub enum PdfError {
    /// 单个 PDF 无法打开或提取文本
    Unreadable {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 所有输入 PDF 都没有提取出任何文本
    NoContentExtracted,
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::Unreadable { path, source } => {
                write!(f, "无法读取PDF ({}): {}", path, source)
            }
            PdfError::NoContentExtracted => {
                write!(f, "提供的笔记PDF中没有可读取的文本")
            }
        }
    }
}

impl std::error::Error for PdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PdfError::Unreadable { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            PdfError::NoContentExtracted => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    DirectoryNotFound {
        path: String,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::DirectoryNotFound { path } => write!(f, "目录不存在: {}", path),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 模式模型错误
#[derive(Debug)]
pub enum ModelError {
    /// 模型文件存在但反序列化失败
    Malformed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 模型序列化失败
    SerializeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Malformed { path, source } => {
                write!(f, "模型文件损坏 ({}): {}", path, source)
            }
            ModelError::SerializeFailed { source } => {
                write!(f, "模型序列化失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Malformed { source, .. } | ModelError::SerializeFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
    /// 返回内容不是期望的 JSON 结构
    JsonParseFailed {
        response: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
            LlmError::JsonParseFailed { response, source } => {
                write!(f, "无法解析LLM返回的JSON (响应: {}): {}", response, source)
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::ApiCallFailed { source, .. } | LlmError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 必需的 API 凭证缺失
    MissingCredential {
        var_name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCredential { var_name } => {
                write!(f, "环境变量 {} 未设置，无法调用生成接口", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Llm(LlmError::JsonParseFailed {
            response: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建PDF读取错误
    pub fn pdf_unreadable(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Pdf(PdfError::Unreadable {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建凭证缺失错误
    pub fn missing_credential(var_name: impl Into<String>) -> Self {
        AppError::Config(ConfigError::MissingCredential {
            var_name: var_name.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
