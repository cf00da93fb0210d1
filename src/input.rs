//! Timetable input sources.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};

const STDIN_MARKER: &str = "-";

/// Where a timetable document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Interpret command-line inputs. Stdin can only be read once.
    pub fn parse_all(args: &[String]) -> Result<Vec<Input>> {
        let inputs: Vec<Input> = args.iter().map(|arg| Input::from_arg(arg)).collect();

        if inputs.iter().filter(|i| **i == Input::Stdin).count() > 1 {
            anyhow::bail!("Standard input ('{}') can only be given once", STDIN_MARKER);
        }

        Ok(inputs)
    }

    fn from_arg(arg: &str) -> Input {
        if arg == STDIN_MARKER {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(arg))
        }
    }

    pub fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            Input::Stdin => Ok(Box::new(std::io::stdin().lock())),
            Input::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}
