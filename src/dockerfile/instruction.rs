use serde::Serialize;

/// One Dockerfile instruction, reduced to what the detector needs.
///
/// `line` is 1-based and points at the first physical line of the instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "instruction", rename_all = "UPPERCASE")]
pub enum Instruction {
    /// `ARG KEY[=default] ...`, one entry per declared argument
    Arg { line: usize, entries: Vec<String> },
    /// `FROM <image> [AS <stage>]`
    From {
        line: usize,
        image: String,
        stage: Option<String>,
    },
    /// `COPY [--from=<value>] ...`
    Copy { line: usize, from: Option<String> },
    Other { line: usize, keyword: String },
}

impl Instruction {
    pub fn line(&self) -> usize {
        match self {
            Instruction::Arg { line, .. }
            | Instruction::From { line, .. }
            | Instruction::Copy { line, .. }
            | Instruction::Other { line, .. } => *line,
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            Instruction::Arg { .. } => "ARG",
            Instruction::From { .. } => "FROM",
            Instruction::Copy { .. } => "COPY",
            Instruction::Other { keyword, .. } => keyword.as_str(),
        }
    }
}

/// A `#` comment line and its text with the marker stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub line: usize,
    pub text: String,
}

/// A Dockerfile as an ordered list of instructions plus its comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dockerfile {
    pub instructions: Vec<Instruction>,
    pub comments: Vec<Comment>,
}

impl Dockerfile {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            comments: Vec::new(),
        }
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }
}
