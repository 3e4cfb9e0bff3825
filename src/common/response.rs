// src/common/response.rs

use serde::Serialize;

// Envelope padrão das respostas de sucesso: { success, data?, count? }
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, data: Some(data), count: None }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}
