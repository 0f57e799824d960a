//! LLM 服务 - 业务能力层
//!
//! 只负责"调用生成模型"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 通过 Gemini 的 OpenAI 兼容端点访问 Gemini

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError};
use crate::models::generated::{GeneratedSections, Section};

/// LLM 服务
///
/// 职责：
/// - 提供通用的 LLM 调用接口
/// - 把生成响应解析为 sections 结构
/// - 不关心模式模型和笔记来自哪里
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.gemini_api_key)
            .with_api_base(&config.gemini_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.gemini_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，其他所有 LLM 相关功能都应该基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(8192u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 调用 LLM 生成试卷章节
    ///
    /// 响应必须是 `{"sections": [...]}` 形状的 JSON；
    /// 解析失败属于生成失败，向上抛出
    pub async fn generate_sections(&self, prompt: &str) -> Result<Vec<Section>> {
        let response = self.send_to_llm(prompt, None).await?;

        let cleaned = strip_code_fences(&response);
        let parsed: GeneratedSections = serde_json::from_str(cleaned).map_err(|e| {
            AppError::Llm(LlmError::JsonParseFailed {
                response: truncate_for_log(&response, 200),
                source: Box::new(e),
            })
        })?;

        debug!("LLM 返回 {} 个章节", parsed.sections.len());
        Ok(parsed.sections)
    }
}

/// 去掉响应两端可能出现的 Markdown 代码围栏
///
/// 提示词要求纯 JSON，但模型偶尔仍会包一层 ```json ... ```
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// 截断长文本用于错误信息
fn truncate_for_log(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
