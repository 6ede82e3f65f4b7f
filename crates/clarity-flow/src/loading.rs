//! Rotating status lines shown while synthesis runs. Cosmetic only: pure
//! state rotation driven by the host's timer, no external effect.

use clarity_core::SynthesisRequest;

#[derive(Debug, Clone)]
pub struct StatusRotation {
    lines: Vec<String>,
    idx: usize,
}

impl StatusRotation {
    pub fn for_audit(req: &SynthesisRequest) -> Self {
        let data_source = req.answer_text("data-source", "Data");
        let goal = req.answer_text("goal", "Growth");
        StatusRotation {
            lines: vec![
                "Analyzing Industry Benchmarks...".to_string(),
                format!("Evaluating {data_source} Reliability..."),
                format!("Optimizing for {goal}..."),
                "Calculating Readiness Score...".to_string(),
                "Generating Strategic Roadmap...".to_string(),
            ],
            idx: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.lines[self.idx]
    }

    /// Rotate to the next line, wrapping around.
    pub fn tick(&mut self) -> &str {
        self.idx = (self.idx + 1) % self.lines.len();
        self.current()
    }
}
