//! Annotated shader files.
//!
//! A single `.shader` file holds both stages of a program. Each stage starts at a
//! marker line (`#shader vertex` or `#shader fragment`) and runs until the next
//! marker or the end of the file. [`ShaderProgramSource`] splits such a file into
//! one source string per stage.

use std::io::BufRead;
use std::path::Path;

use crate::abs::ShaderStage;
use crate::error::SourceError;

const MARKER: &str = "#shader";

/// The GLSL text of both stages, as split out of an annotated shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgramSource {
    /// Reads and splits the shader file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| SourceError::open(path, e))?;
        let source = Self::parse(std::io::BufReader::new(file))?;
        log::debug!(
            "Loaded {} ({} bytes vertex, {} bytes fragment)",
            path.display(),
            source.vertex.len(),
            source.fragment.len()
        );
        Ok(source)
    }

    /// Splits annotated shader text read from `reader`.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, SourceError> {
        let mut source = Self::default();
        let mut current: Option<ShaderStage> = None;
        let mut seen = (false, false);

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.contains(MARKER) {
                let stage = if line.contains("vertex") {
                    ShaderStage::Vertex
                } else if line.contains("fragment") {
                    ShaderStage::Fragment
                } else {
                    return Err(SourceError::Format {
                        line: line_number,
                        message: format!("unknown shader stage in marker `{}`", line.trim()),
                    });
                };
                match stage {
                    ShaderStage::Vertex => seen.0 = true,
                    ShaderStage::Fragment => seen.1 = true,
                }
                current = Some(stage);
                continue;
            }

            let Some(stage) = current else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(SourceError::Format {
                    line: line_number,
                    message: "content before the first `#shader` marker".to_string(),
                });
            };

            let buffer = source.stage_mut(stage);
            buffer.push_str(&line);
            buffer.push('\n');
        }

        if !seen.0 {
            return Err(SourceError::MissingStage(ShaderStage::Vertex));
        }
        if !seen.1 {
            return Err(SourceError::MissingStage(ShaderStage::Fragment));
        }

        Ok(source)
    }

    /// Returns the source text of `stage`.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

impl std::str::FromStr for ShaderProgramSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_splits_two_sections() {
        let source = "#shader vertex\nA\n#shader fragment\nB\n"
            .parse::<ShaderProgramSource>()
            .unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_preserves_line_order_and_drops_markers() {
        let input = "\
#shader vertex
#version 330 core
layout(location = 0) in vec4 position;
void main() { gl_Position = position; }
#shader fragment
#version 330 core

out vec4 color;
void main() { color = vec4(1.0); }";
        let source = input.parse::<ShaderProgramSource>().unwrap();

        assert_eq!(
            source.vertex,
            "#version 330 core\nlayout(location = 0) in vec4 position;\nvoid main() { gl_Position = position; }\n"
        );
        assert_eq!(
            source.fragment,
            "#version 330 core\n\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n"
        );

        let body: Vec<&str> = input.lines().filter(|l| !l.contains(MARKER)).collect();
        let joined: Vec<&str> = source.vertex.lines().chain(source.fragment.lines()).collect();
        assert_eq!(body, joined);
    }

    #[test]
    fn test_fragment_first() {
        let source = "#shader fragment\nF\n#shader vertex\nV\n"
            .parse::<ShaderProgramSource>()
            .unwrap();
        assert_eq!(source.stage(ShaderStage::Vertex), "V\n");
        assert_eq!(source.stage(ShaderStage::Fragment), "F\n");
    }

    #[test]
    fn test_repeated_section_appends() {
        let source = "#shader vertex\nA\n#shader fragment\nB\n#shader vertex\nC\n"
            .parse::<ShaderProgramSource>()
            .unwrap();
        assert_eq!(source.vertex, "A\nC\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "#shader vertex\r\nA\r\n#shader fragment\r\nB\r\n"
            .parse::<ShaderProgramSource>()
            .unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_content_before_marker() {
        let err = "\n\nvoid main() {}\n#shader vertex\n#shader fragment\n"
            .parse::<ShaderProgramSource>()
            .unwrap_err();
        assert!(matches!(err, SourceError::Format { line: 3, .. }));
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let source = "\n   \n#shader vertex\nA\n#shader fragment\nB\n"
            .parse::<ShaderProgramSource>()
            .unwrap();
        assert_eq!(source.vertex, "A\n");
    }

    #[test]
    fn test_unknown_stage() {
        let err = "#shader vertex\nA\n#shader geometry\nB\n"
            .parse::<ShaderProgramSource>()
            .unwrap_err();
        assert!(matches!(err, SourceError::Format { line: 3, .. }));
    }

    #[test]
    fn test_missing_stage() {
        let err = "#shader vertex\nA\n"
            .parse::<ShaderProgramSource>()
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingStage(ShaderStage::Fragment)));

        let err = "#shader fragment\nB\n"
            .parse::<ShaderProgramSource>()
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingStage(ShaderStage::Vertex)));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let bytes: &[u8] = b"#shader vertex\n\xff\n#shader fragment\n";
        let err = ShaderProgramSource::parse(bytes).unwrap_err();
        assert!(matches!(err, SourceError::Io(ref e) if e.kind() == std::io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#shader vertex\nA\n#shader fragment\nB\n").unwrap();

        let source = ShaderProgramSource::load(file.path()).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShaderProgramSource::load(dir.path().join("Missing.shader")).unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound(_)));
    }

    #[test]
    fn test_bundled_basic_shader() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/res/shaders/Basic.shader");
        let source = ShaderProgramSource::load(path).unwrap();
        assert!(source.vertex.starts_with("#version 330 core"));
        assert!(source.fragment.contains("u_color"));
    }
}
