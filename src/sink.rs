pub mod memory;
pub mod svg_doc;

use crate::foundation::error::MotionResult;

/// Where the raw path string lives: read once at startup, rewritten every frame.
pub trait PathSink {
    fn read_path(&self) -> MotionResult<String>;
    fn write_path(&mut self, d: &str) -> MotionResult<()>;
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn read_path(&self) -> MotionResult<String> {
        (**self).read_path()
    }

    fn write_path(&mut self, d: &str) -> MotionResult<()> {
        (**self).write_path(d)
    }
}

impl<S: PathSink + ?Sized> PathSink for Box<S> {
    fn read_path(&self) -> MotionResult<String> {
        (**self).read_path()
    }

    fn write_path(&mut self, d: &str) -> MotionResult<()> {
        (**self).write_path(d)
    }
}
