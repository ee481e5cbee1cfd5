use dashmap::DashMap;
use pressbase_domain::DomainError;
use regex::Regex;

/// Glob-to-regex compiler for cache key patterns.
///
/// Keys are colon-joined segments over `[A-Za-z0-9_-]`; a glob reuses the
/// same grammar with `*` matching zero or more characters. Compiled
/// patterns are anchored (`^...$`) and memoized, so repeated invalidations
/// of the same shape never recompile.
pub struct PatternCompiler {
    compiled: DashMap<String, Regex>,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self {
            compiled: DashMap::new(),
        }
    }

    /// Returns an anchored matcher for `glob`, compiling it on first use.
    pub fn compile(&self, glob: &str) -> Result<Regex, DomainError> {
        if let Some(regex) = self.compiled.get(glob) {
            return Ok(regex.clone());
        }

        validate_glob(glob)?;

        let mut source = String::with_capacity(glob.len() + 8);
        source.push('^');
        for c in glob.chars() {
            match c {
                '*' => source.push_str(".*"),
                ':' => source.push(':'),
                c if c.is_ascii_alphanumeric() || c == '_' => source.push(c),
                '-' => source.push_str("\\-"),
                _ => unreachable!("validate_glob admits only grammar characters"),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| DomainError::Validation(format!("Pattern '{glob}' is invalid: {e}")))?;
        self.compiled.insert(glob.to_string(), regex.clone());
        Ok(regex)
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_glob(glob: &str) -> Result<(), DomainError> {
    if glob.is_empty() {
        return Err(DomainError::Validation(
            "Key pattern cannot be empty".to_string(),
        ));
    }
    let mut segments = 0;
    for segment in glob.split(':') {
        segments += 1;
        if segment.is_empty() {
            return Err(DomainError::Validation(format!(
                "Key pattern '{glob}' contains an empty segment"
            )));
        }
        let valid = segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*');
        if !valid {
            return Err(DomainError::Validation(format!(
                "Key pattern segment '{segment}' contains characters outside [A-Za-z0-9_*-]"
            )));
        }
    }
    debug_assert!(segments > 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_exactly() {
        let compiler = PatternCompiler::new();
        let regex = compiler.compile("articles:site-A:id:a1").unwrap();
        assert!(regex.is_match("articles:site-A:id:a1"));
        assert!(!regex.is_match("articles:site-A:id:a12"));
        assert!(!regex.is_match("xarticles:site-A:id:a1"));
    }

    #[test]
    fn star_spans_segments() {
        let compiler = PatternCompiler::new();
        let regex = compiler.compile("articles:site-A:*").unwrap();
        assert!(regex.is_match("articles:site-A:id:a1"));
        assert!(regex.is_match("articles:site-A:list:published"));
    }

    #[test]
    fn tenant_segment_is_never_a_prefix_match() {
        // "T1" must not capture keys of tenant "T10": the trailing colon in
        // the pattern has to be matched literally.
        let compiler = PatternCompiler::new();
        let regex = compiler.compile("articles:T1:*").unwrap();
        assert!(regex.is_match("articles:T1:id:a1"));
        assert!(!regex.is_match("articles:T10:id:a1"));
    }

    #[test]
    fn hyphenated_ids_are_matched_literally() {
        let compiler = PatternCompiler::new();
        let regex = compiler.compile("sites:my-blog:settings").unwrap();
        assert!(regex.is_match("sites:my-blog:settings"));
        assert!(!regex.is_match("sites:myxblog:settings"));
    }

    #[test]
    fn rejects_out_of_grammar_globs() {
        let compiler = PatternCompiler::new();
        assert!(compiler.compile("").is_err());
        assert!(compiler.compile("articles::id").is_err());
        assert!(compiler.compile("articles:site A:*").is_err());
        assert!(compiler.compile("articles:site.(A):*").is_err());
    }

    #[test]
    fn compile_is_memoized() {
        let compiler = PatternCompiler::new();
        compiler.compile("articles:site-A:*").unwrap();
        compiler.compile("articles:site-A:*").unwrap();
        assert_eq!(compiler.compiled.len(), 1);
    }
}
