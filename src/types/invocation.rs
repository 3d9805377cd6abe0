use std::fmt;
use std::path::PathBuf;

/// A writer command line: the binary followed by its positional arguments.
///
/// Built once per accepted start request and consumed by a single spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for LaunchInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
