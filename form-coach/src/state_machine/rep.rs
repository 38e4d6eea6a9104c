//! Completed repetition records and quality scoring

use serde::{Deserialize, Serialize};

/// Quality band of one completed rep
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl RepQuality {
    /// Score a rep from its form error count and duration
    ///
    /// - excellent: no errors, 1–4 s
    /// - good: at most one error, longer than 0.8 s
    /// - fair: at most two errors
    /// - poor: anything else
    pub fn score(form_errors: usize, duration_ms: f64) -> Self {
        let seconds = duration_ms / 1000.0;
        if form_errors == 0 && (1.0..=4.0).contains(&seconds) {
            RepQuality::Excellent
        } else if form_errors <= 1 && seconds > 0.8 {
            RepQuality::Good
        } else if form_errors <= 2 {
            RepQuality::Fair
        } else {
            RepQuality::Poor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RepQuality::Excellent => "Perfect rep!",
            RepQuality::Good => "Good rep",
            RepQuality::Fair => "Rep counted - watch your form",
            RepQuality::Poor => "Slow down and focus on form",
        }
    }
}

/// One repetition, opened on entering CONTRACT and closed leaving it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rep {
    pub count: u32,
    pub start_time: f64,
    pub end_time: Option<f64>,
    pub quality: RepQuality,
    pub feedback: Vec<String>,
    pub form_errors: Vec<String>,
}

impl Rep {
    pub(crate) fn open(count: u32, start_time: f64) -> Self {
        Self {
            count,
            start_time,
            end_time: None,
            quality: RepQuality::Poor,
            feedback: Vec::new(),
            form_errors: Vec::new(),
        }
    }

    pub(crate) fn note_errors(&mut self, errors: &[&'static str]) {
        for &error in errors {
            if !self.form_errors.iter().any(|e| e == error) {
                self.form_errors.push(error.to_string());
            }
        }
    }

    pub(crate) fn close(&mut self, count: u32, end_time: f64) {
        self.count = count;
        self.end_time = Some(end_time);
        self.quality = RepQuality::score(self.form_errors.len(), end_time - self.start_time);
        self.feedback.push(self.quality.message().to_string());
        self.feedback.extend(self.form_errors.iter().cloned());
    }

    pub fn duration_ms(&self) -> Option<f64> {
        self.end_time.map(|end| end - self.start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_bands() {
        assert_eq!(RepQuality::score(0, 2000.0), RepQuality::Excellent);
        assert_eq!(RepQuality::score(0, 1000.0), RepQuality::Excellent);
        assert_eq!(RepQuality::score(0, 4500.0), RepQuality::Good);
        assert_eq!(RepQuality::score(1, 900.0), RepQuality::Good);
        assert_eq!(RepQuality::score(0, 500.0), RepQuality::Fair);
        assert_eq!(RepQuality::score(2, 2000.0), RepQuality::Fair);
        assert_eq!(RepQuality::score(3, 2000.0), RepQuality::Poor);
    }

    #[test]
    fn close_scores_and_dedupes_errors() {
        let mut rep = Rep::open(1, 1000.0);
        rep.note_errors(&["Keep your knees bent"]);
        rep.note_errors(&["Keep your knees bent"]);
        rep.close(1, 3000.0);
        assert_eq!(rep.form_errors.len(), 1);
        assert_eq!(rep.quality, RepQuality::Good);
        assert_eq!(rep.duration_ms(), Some(2000.0));
        assert_eq!(rep.feedback[0], "Good rep");
    }
}
