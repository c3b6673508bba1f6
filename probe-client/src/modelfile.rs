// Modelfile construction for /api/create.
//
// A Modelfile is the line-oriented directive format Ollama uses to derive
// one model from another: a FROM line naming the base, then
// PARAMETER <key> <value> lines.

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct Modelfile {
    base: String,
    parameters: Vec<(String, String)>,
}

impl Modelfile {
    pub fn from_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a `PARAMETER` line. Order is preserved in the rendered file.
    pub fn parameter(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.parameters.push((key.into(), value.to_string()));
        self
    }

    /// The performance-tuned derivation used for slow coder models:
    /// reduced context, fixed thread and GPU-layer counts, standard
    /// sampling parameters.
    pub fn tuned(base: impl Into<String>) -> Self {
        Self::from_base(base)
            .parameter("num_ctx", 2048)
            .parameter("num_thread", 8)
            .parameter("num_gpu", 50)
            .parameter("temperature", 0.7)
            .parameter("top_k", 40)
            .parameter("top_p", 0.9)
            .parameter("repeat_penalty", 1.1)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the directive string sent in the create payload.
    pub fn render(&self) -> String {
        let mut out = format!("FROM {}\n", self.base);
        for (key, value) in &self.parameters {
            out.push_str(&format!("PARAMETER {} {}\n", key, value));
        }
        out
    }
}
