//! Data Transfer Objects
//!
//! - `http`: 管理 API のレスポンス
//!
//! TCP の行プロトコルは `turnboard_shared::protocol` が扱います。

pub mod http;
