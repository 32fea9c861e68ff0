//! Q&A chat collaborator: canned offline answers, or a single blocking call to
//! an OpenAI-compatible chat-completions endpoint.
//!
//! Failures never surface as errors to the caller of [`Assistant::ask`]: every
//! [`ChatError`] is turned into the text shown in place of an answer. A missing
//! API key is caught earlier, when the [`ChatConfig`] is built, so no request
//! is ever attempted without one.

use std::time::Duration;
use serde::{ Deserialize, Serialize };
use serde_json::{ json, Value };
use crate::{
    config::ChatSettings,
    error::{ ChatError, ConfigError },
};

pub type ChatResult<T> = Result<T, ChatError>;

/// System message sent ahead of the user's question to the DeepSeek model.
pub const TUTOR_PROMPT: &str
    = "你是一位精通偏微分方程（PDE）、数值分析和科学计算的专业助教。你的回答应准确、简洁、专业。";

/// Model that receives [`TUTOR_PROMPT`].
pub const TUTOR_MODEL: &str = "deepseek-chat";

/// Where answers come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    /// Canned answers; no network access.
    #[default]
    Offline,
    /// Free ChatGPT-compatible endpoint.
    #[serde(rename = "chatgpt")]
    ChatGpt,
    /// DeepSeek endpoint; requires a user key.
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl ModelSource {
    pub const ALL: [Self; 3] = [Self::Offline, Self::ChatGpt, Self::DeepSeek];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offline => "内置模拟 (离线测试)",
            Self::ChatGpt => "ChatGPT (免费默认 API)",
            Self::DeepSeek => "DeepSeek (需 Key)",
        }
    }

    /// Short ASCII identifier, as used in the configuration file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::ChatGpt => "chatgpt",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Look up a source by [`key`][Self::key].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Return `true` if `self` is `Offline`.
    pub fn is_offline(&self) -> bool { matches!(self, Self::Offline) }

    /// Warning shown when an online source has no key configured.
    pub fn missing_key_warning(&self) -> String {
        match self {
            Self::Offline => String::new(),
            Self::ChatGpt => "⚠️ 请配置 Key 以启用 ChatGPT 模型。".to_string(),
            Self::DeepSeek => "⚠️ 请输入 Key 以启用 DeepSeek 模型。".to_string(),
        }
    }
}

/// Connection details for an online source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Endpoint {
    /// Full URL of the chat-completions route.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Validated chat configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
    pub source: ModelSource,
    /// `None` exactly when `source` is offline.
    pub endpoint: Option<Endpoint>,
    pub timeout: Duration,
    pub temperature: f64,
}

fn nonempty(key: &Option<String>) -> Option<String> {
    key.as_ref()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

impl ChatConfig {
    /// Offline configuration.
    pub fn offline() -> Self {
        let defaults = ChatSettings::default();
        Self {
            source: ModelSource::Offline,
            endpoint: None,
            timeout: Duration::from_secs_f64(defaults.timeout_secs),
            temperature: defaults.temperature,
        }
    }

    /// Build from settings.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] if an online source is
    /// selected without a (non-blank) key.
    pub fn from_settings(settings: &ChatSettings) -> Result<Self, ConfigError> {
        let endpoint = match settings.source {
            ModelSource::Offline => None,
            ModelSource::ChatGpt => Some(Endpoint {
                api_key: nonempty(&settings.chatgpt_key)
                    .ok_or(ConfigError::MissingApiKey("ChatGPT"))?,
                base_url: settings.chatgpt_base_url.clone(),
                model: settings.chatgpt_model.clone(),
            }),
            ModelSource::DeepSeek => Some(Endpoint {
                api_key: nonempty(&settings.deepseek_key)
                    .ok_or(ConfigError::MissingApiKey("DeepSeek"))?,
                base_url: settings.deepseek_base_url.clone(),
                model: settings.deepseek_model.clone(),
            }),
        };
        let timeout = if settings.timeout_secs.is_finite() && settings.timeout_secs > 0.0 {
            Duration::from_secs_f64(settings.timeout_secs)
        } else {
            Duration::from_secs(30)
        };
        Ok(Self {
            source: settings.source,
            endpoint,
            timeout,
            temperature: settings.temperature,
        })
    }

    /// Status line describing the active source.
    pub fn notice(&self) -> String {
        match &self.endpoint {
            None => "ℹ️ 当前使用内置模拟问答。无需网络连接。\n 仅供如下问题测试：\n 1、什么是有限差分算法？\n 2、什么是PINNs？\n 3、什么是Navier-Stokes方程？".to_string(),
            Some(ep) => format!(
                "✅ {} 已配置。模型: `{}`, Base URL: `{}`",
                self.source.label(), ep.model, ep.base_url,
            ),
        }
    }
}

/// Canned answer for the offline source, chosen by keyword.
pub fn offline_answer(prompt: &str) -> &'static str {
    let has = |keys: &[&str]| keys.iter().any(|k| prompt.contains(k));
    if has(&["FDM", "有限差分"]) {
        "有限差分法（FDM）是一种通过将微分方程中的导数用代数差分近似来求解 PDE 的方法。它适用于规则网格，但处理复杂几何边界较为困难。您具体想了解 FDM 的哪种格式（如显式、隐式）？"
    } else if has(&["PINNs", "物理信息"]) {
        "PINNs（物理信息神经网络）是一种无需网格和大量标签数据的求解方法。它将 PDE 残差加入损失函数中，让神经网络在训练过程中遵守物理定律。它非常擅长解决反问题。您希望我提供一个 PINNs 解决反问题的例子吗？"
    } else if has(&["Navier-Stokes", "纳维-斯托克斯"]) {
        "纳维-斯托克斯方程是描述粘性流体动量守恒的核心方程。它是一个复杂的非线性 PDE 组，求解难度极大，传统上多采用有限体积法（FVM）进行离散化求解。"
    } else {
        "欢迎提出您关于偏微分方程、数值方法或 AI 求解的任何问题！请尽量具体地描述您想了解的概念，我会尽力为您解答。"
    }
}

/// Speaker of a chat turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// In-memory conversation log for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatHistory {
    turns: Vec<Turn>,
}

impl ChatHistory {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, role: Role, content: &str) {
        self.turns.push(Turn { role, content: content.to_string() });
    }

    pub fn len(&self) -> usize { self.turns.len() }

    pub fn is_empty(&self) -> bool { self.turns.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> { self.turns.iter() }

    pub fn last(&self) -> Option<&Turn> { self.turns.last() }

    pub fn clear(&mut self) { self.turns.clear(); }
}

/// Message list for a request: the question alone, preceded by the tutor
/// system message when talking to [`TUTOR_MODEL`].
pub fn request_messages(model: &str, prompt: &str) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(2);
    if model == TUTOR_MODEL {
        messages.push(Turn { role: Role::System, content: TUTOR_PROMPT.to_string() });
    }
    messages.push(Turn { role: Role::User, content: prompt.to_string() });
    messages
}

#[derive(Debug, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// pull `error.code` and `error.message` out of an OpenAI-style error body,
// falling back to the raw text
fn status_error(status: u16, body: &str) -> ChatError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let err = parsed.as_ref().and_then(|v| v.get("error"));
    let code = match err.and_then(|e| e.get("code")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    };
    let message = err
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| body.trim().to_string());
    ChatError::Status { status, code, message }
}

/// Issue one chat-completion request and return the first choice's text.
pub fn complete(
    agent: &ureq::Agent,
    endpoint: &Endpoint,
    prompt: &str,
    temperature: f64,
) -> ChatResult<String>
{
    let body = json!({
        "model": endpoint.model,
        "messages": request_messages(&endpoint.model, prompt),
        "temperature": temperature,
        "stream": false,
    });
    let response = agent.post(&endpoint.completions_url())
        .set("Authorization", &format!("Bearer {}", endpoint.api_key))
        .send_json(body);
    match response {
        Ok(resp) => {
            let completion: Completion = resp.into_json()?;
            completion.choices.into_iter()
                .next()
                .map(|choice| choice.message.content.unwrap_or_default())
                .ok_or(ChatError::EmptyChoices)
        },
        Err(ureq::Error::Status(status, resp)) => {
            let text = resp.into_string().unwrap_or_default();
            Err(status_error(status, &text))
        },
        Err(ureq::Error::Transport(err)) => Err(ChatError::Transport(err.to_string())),
    }
}

/// A chat session: configuration, HTTP agent, and history.
#[derive(Debug)]
pub struct Assistant {
    config: ChatConfig,
    agent: ureq::Agent,
    history: ChatHistory,
}

impl Assistant {
    pub fn new(config: ChatConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .build();
        Self { config, agent, history: ChatHistory::new() }
    }

    pub fn config(&self) -> &ChatConfig { &self.config }

    pub fn history(&self) -> &ChatHistory { &self.history }

    /// Answer `prompt`, recording both turns in the history.
    ///
    /// Online failures are returned as descriptive text.
    pub fn ask(&mut self, prompt: &str) -> String {
        self.history.push(Role::User, prompt);
        let answer = match &self.config.endpoint {
            None => offline_answer(prompt).to_string(),
            Some(endpoint) => {
                complete(&self.agent, endpoint, prompt, self.config.temperature)
                    .unwrap_or_else(|err| {
                        log::warn!("chat::Assistant::ask: {err:?}");
                        err.to_string()
                    })
            },
        };
        self.history.push(Role::Assistant, &answer);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{ Read, Write },
        net::TcpListener,
        thread,
    };

    // serve a single canned HTTP response and hand back the raw request
    fn serve_once(status: &'static str, body: &'static str)
        -> (String, thread::JoinHandle<String>)
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf: Vec<u8> = Vec::new();
            let mut chunk = [0_u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 { break; }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let len = text[..end].lines()
                        .find_map(|l| {
                            let l = l.to_ascii_lowercase();
                            l.strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + len { break; }
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });
        (format!("http://{addr}/v1/"), handle)
    }

    fn online(source: ModelSource, base_url: String, model: &str) -> ChatConfig {
        ChatConfig {
            source,
            endpoint: Some(Endpoint {
                api_key: "sk-test".to_string(),
                base_url,
                model: model.to_string(),
            }),
            timeout: Duration::from_secs(5),
            temperature: 0.7,
        }
    }

    #[test]
    fn offline_keywords() {
        assert!(offline_answer("什么是有限差分算法？").starts_with("有限差分法（FDM）"));
        assert!(offline_answer("explain FDM").starts_with("有限差分法（FDM）"));
        assert!(offline_answer("什么是PINNs？").starts_with("PINNs（物理信息神经网络）"));
        assert!(offline_answer("Navier-Stokes?").starts_with("纳维-斯托克斯方程"));
        assert!(offline_answer("hello").starts_with("欢迎提出"));
    }

    #[test]
    fn missing_key_blocks_config() {
        let settings = ChatSettings {
            source: ModelSource::DeepSeek,
            deepseek_key: Some("   ".to_string()),
            ..ChatSettings::default()
        };
        let res = ChatConfig::from_settings(&settings);
        assert!(matches!(res, Err(ConfigError::MissingApiKey("DeepSeek"))));
        let settings = ChatSettings {
            source: ModelSource::ChatGpt,
            ..ChatSettings::default()
        };
        let res = ChatConfig::from_settings(&settings);
        assert!(matches!(res, Err(ConfigError::MissingApiKey("ChatGPT"))));
        let offline = ChatConfig::from_settings(&ChatSettings::default()).unwrap();
        assert_eq!(offline, ChatConfig::offline());
    }

    #[test]
    fn completions_url_joins_cleanly() {
        let ep = Endpoint {
            api_key: String::new(),
            base_url: "https://free.v36.cm/v1/".to_string(),
            model: String::new(),
        };
        assert_eq!(ep.completions_url(), "https://free.v36.cm/v1/chat/completions");
    }

    #[test]
    fn tutor_message_only_for_deepseek_chat() {
        let with = request_messages("deepseek-chat", "q");
        assert_eq!(with.len(), 2);
        assert_eq!(with[0].role, Role::System);
        assert_eq!(with[0].content, TUTOR_PROMPT);
        let without = request_messages("gpt-4o-mini", "q");
        assert_eq!(without, vec![Turn { role: Role::User, content: "q".to_string() }]);
    }

    #[test]
    fn successful_completion() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"拉普拉斯方程是椭圆型。"}}]}"#,
        );
        let mut assistant = Assistant::new(online(ModelSource::DeepSeek, url, "deepseek-chat"));
        let answer = assistant.ask("拉普拉斯方程是什么类型？");
        assert_eq!(answer, "拉普拉斯方程是椭圆型。");
        assert_eq!(assistant.history().len(), 2);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.contains("Bearer sk-test"));
        let body: Value = serde_json::from_str(request.split("\r\n\r\n").nth(1).unwrap()).unwrap();
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["temperature"], json!(0.7));
        assert_eq!(body["messages"][0]["role"], json!("system"));
        assert_eq!(body["messages"][1]["content"], json!("拉普拉斯方程是什么类型？"));
    }

    #[test]
    fn status_failure_becomes_text() {
        let (url, server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
        );
        let mut assistant = Assistant::new(online(ModelSource::ChatGpt, url, "gpt-4o-mini"));
        let answer = assistant.ask("hi");
        assert_eq!(
            answer,
            "API 请求失败（401 invalid_api_key）。请检查 Base URL, Key 或模型。\n\
            错误详情：Incorrect API key provided",
        );
        let request = server.join().unwrap();
        assert!(!request.contains("system"));
    }

    #[test]
    fn empty_choices_become_text() {
        let (url, server) = serve_once("200 OK", r#"{"choices":[]}"#);
        let mut assistant = Assistant::new(online(ModelSource::ChatGpt, url, "gpt-4o-mini"));
        assert_eq!(assistant.ask("hi"), "API 响应无内容 (choices 列表为空)。");
        server.join().unwrap();
    }

    #[test]
    fn connection_refused_becomes_text() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{port}/");
        let mut assistant = Assistant::new(online(ModelSource::ChatGpt, url, "gpt-4o-mini"));
        let answer = assistant.ask("hi");
        assert!(answer.starts_with("处理时发生未知错误："));
        assert_eq!(assistant.history().last().unwrap().content, answer);
    }
}
