/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 训练用试卷 PDF 存放目录
    pub input_pdfs_dir: String,
    /// 解析结果（units.json）输出目录
    pub data_dir: String,
    /// 模式模型存放目录
    pub models_dir: String,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_pdfs_dir: "input_pdfs".to_string(),
            data_dir: "data".to_string(),
            models_dir: "models".to_string(),
            output_log_file: "output.txt".to_string(),
            gemini_api_key: String::new(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            gemini_model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_pdfs_dir: std::env::var("INPUT_PDFS_DIR").unwrap_or(default.input_pdfs_dir),
            data_dir: std::env::var("DATA_DIR").unwrap_or(default.data_dir),
            models_dir: std::env::var("MODELS_DIR").unwrap_or(default.models_dir),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or(default.gemini_api_key),
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL")
                .unwrap_or(default.gemini_api_base_url),
            gemini_model_name: std::env::var("GEMINI_MODEL_NAME")
                .unwrap_or(default.gemini_model_name),
        }
    }
}
