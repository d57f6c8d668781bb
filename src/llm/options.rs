/// Per-call generation options, merged into a request right before it is sent.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub seed: Option<i64>,
    pub stop_words: Option<Vec<String>>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stop_words(mut self, stop_words: Vec<String>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Overlays `incoming` on top of `self`; set fields of `incoming` win.
    pub fn merge_options(&mut self, incoming: CallOptions) {
        if incoming.max_tokens.is_some() {
            self.max_tokens = incoming.max_tokens;
        }
        if incoming.temperature.is_some() {
            self.temperature = incoming.temperature;
        }
        if incoming.top_p.is_some() {
            self.top_p = incoming.top_p;
        }
        if incoming.seed.is_some() {
            self.seed = incoming.seed;
        }
        if incoming.stop_words.is_some() {
            self.stop_words = incoming.stop_words;
        }
    }
}
