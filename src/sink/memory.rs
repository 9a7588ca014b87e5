use crate::{foundation::error::MotionResult, sink::PathSink};

/// Path attribute held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    path: String,
    writes: u64,
}

impl MemorySink {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of writes since construction.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl PathSink for MemorySink {
    fn read_path(&self) -> MotionResult<String> {
        Ok(self.path.clone())
    }

    fn write_path(&mut self, d: &str) -> MotionResult<()> {
        self.path.clear();
        self.path.push_str(d);
        self.writes += 1;
        Ok(())
    }
}
