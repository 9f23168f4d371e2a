//! # Shared Constants
//!
//! Defaults and session keys shared by the library, the server and the tests.

/// The OpenAI-compatible chat completions endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The model every page uses unless configuration says otherwise.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The temperature used by the correction, translation and prompt pages.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Session key holding the id of the task rendered last.
pub const ACTIVE_TASK_KEY: &str = "active_task";

/// Prefix of the per-task history keys (`history:<task>`).
pub const HISTORY_KEY_PREFIX: &str = "history:";

/// Warning shown on every render while no API key is present.
pub const MISSING_CREDENTIAL_WARNING: &str = "OPEN API KEY를 입력해주시기 바랍니다.";

/// Warning shown when the document page is submitted without a file.
pub const MISSING_DOCUMENT_WARNING: &str = "PDF 파일과 OpenAI API Key를 모두 입력해야 합니다.";
