//! Kotlin package declaration rewriting
//!
//! Widget sources are authored against one package and installed under the
//! host application's package. Rewriting replaces the `package` declaration
//! and any imports that referenced the old package, and is idempotent.

use regex::{Captures, Regex};
use std::path::{Component, Path};
use std::sync::LazyLock;

use crate::Result;
use widget_fs::io;

static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^[ \t]*package[ \t]+([A-Za-z_][\w.]*)[ \t]*;?[ \t]*$").unwrap()
});

static FILE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*@file:").unwrap());

/// What a rewrite did to a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Declaration already matched the target package
    Unchanged,
    /// No declaration existed, one was added
    Inserted,
    /// Declaration pointed elsewhere and was replaced
    Replaced { from: String },
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The package declared by a Kotlin source, if any.
pub fn current_package(source: &str) -> Option<&str> {
    PACKAGE_PATTERN
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Rewrite the package of Kotlin `source` to `target`.
pub fn rewrite_source(source: &str, target: &str) -> (String, RewriteOutcome) {
    match current_package(source) {
        Some(existing) if existing == target => (source.to_string(), RewriteOutcome::Unchanged),
        Some(existing) => {
            let from = existing.to_string();
            let declared = PACKAGE_PATTERN.replace(source, format!("package {target}").as_str());
            let rewritten = rewrite_imports(&declared, &from, target);
            (rewritten, RewriteOutcome::Replaced { from })
        }
        None => (insert_declaration(source, target), RewriteOutcome::Inserted),
    }
}

/// Point imports of `old` (or its sub-packages) at `new`.
fn rewrite_imports(source: &str, old: &str, new: &str) -> String {
    let pattern = format!(r"(?mR)^([ \t]*import[ \t]+){}(\.|[ \t]*$)", regex::escape(old));
    let Ok(imports) = Regex::new(&pattern) else {
        return source.to_string();
    };
    imports
        .replace_all(source, |caps: &Captures| format!("{}{new}{}", &caps[1], &caps[2]))
        .into_owned()
}

/// Add a declaration after any leading `@file:` annotations.
///
/// The inserted lines use the source's own line ending.
fn insert_declaration(source: &str, target: &str) -> String {
    let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let declaration = format!("package {target}{eol}");
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        if FILE_ANNOTATION.is_match(line) {
            offset += line.len();
        } else {
            break;
        }
    }

    if offset == 0 {
        return format!("{declaration}{eol}{source}");
    }
    let (head, tail) = source.split_at(offset);
    let head = if head.ends_with('\n') {
        head.to_string()
    } else {
        format!("{head}{eol}")
    };
    format!("{head}{eol}{declaration}{tail}")
}

/// Rewrite the Kotlin file at `path` in place.
///
/// The file is only written when its package changes.
pub fn rewrite_file(path: &Path, target: &str) -> Result<RewriteOutcome> {
    let source = io::read_text(path)?;
    let (rewritten, outcome) = rewrite_source(&source, target);
    if outcome.changed() {
        io::write_text(path, &rewritten)?;
        tracing::debug!(path = %path.display(), package = %target, ?outcome, "Rewrote package declaration");
    }
    Ok(outcome)
}

/// Package for a file nested `relative_dir` below a source root of `base`.
///
/// `subpackage("com.app", "charts/line")` is `com.app.charts.line`.
pub fn subpackage(base: &str, relative_dir: &Path) -> String {
    let mut package = base.to_string();
    for component in relative_dir.components() {
        if let Component::Normal(name) = component {
            let name = name.to_string_lossy();
            if name.is_empty() {
                continue;
            }
            if !package.is_empty() {
                package.push('.');
            }
            package.push_str(&name);
        }
    }
    package
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn replaces_declaration_and_self_imports() {
        let source = "package com.old.pkg\n\nimport com.old.pkg.data.Stats\nimport com.old.pkgx.Other\nimport android.widget.RemoteViews\n\nclass MyWidget\n";
        let (rewritten, outcome) = rewrite_source(source, "com.new.pkg");

        assert_eq!(
            outcome,
            RewriteOutcome::Replaced {
                from: "com.old.pkg".into()
            }
        );
        assert_eq!(
            rewritten,
            "package com.new.pkg\n\nimport com.new.pkg.data.Stats\nimport com.old.pkgx.Other\nimport android.widget.RemoteViews\n\nclass MyWidget\n"
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let source = "package com.old.pkg\n\nclass MyWidget\n";
        let (once, _) = rewrite_source(source, "com.new.pkg");
        let (twice, outcome) = rewrite_source(&once, "com.new.pkg");

        assert_eq!(outcome, RewriteOutcome::Unchanged);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_declaration_is_inserted_after_file_annotations() {
        let source = "@file:Suppress(\"unused\")\nimport android.content.Context\n";
        let (rewritten, outcome) = rewrite_source(source, "com.app");

        assert_eq!(outcome, RewriteOutcome::Inserted);
        assert_eq!(
            rewritten,
            "@file:Suppress(\"unused\")\n\npackage com.app\nimport android.content.Context\n"
        );
        assert_eq!(current_package(&rewritten), Some("com.app"));
    }

    #[test]
    fn missing_declaration_is_prepended() {
        let (rewritten, _) = rewrite_source("class A\n", "com.app");
        assert_eq!(rewritten, "package com.app\n\nclass A\n");
    }

    #[test]
    fn crlf_source_is_replaced_not_prepended() {
        let source = "package com.old.pkg\r\n\r\nimport com.old.pkg.data.Stats\r\nimport com.old.pkg\r\n\r\nclass MyWidget\r\n";
        let (rewritten, outcome) = rewrite_source(source, "com.new.pkg");

        assert_eq!(
            outcome,
            RewriteOutcome::Replaced {
                from: "com.old.pkg".into()
            }
        );
        assert_eq!(
            rewritten,
            "package com.new.pkg\r\n\r\nimport com.new.pkg.data.Stats\r\nimport com.new.pkg\r\n\r\nclass MyWidget\r\n"
        );
        assert_eq!(rewrite_source(&rewritten, "com.new.pkg").1, RewriteOutcome::Unchanged);
    }

    #[test]
    fn crlf_source_without_declaration_keeps_line_endings() {
        let (rewritten, outcome) = rewrite_source("class A\r\n", "com.app");

        assert_eq!(outcome, RewriteOutcome::Inserted);
        assert_eq!(rewritten, "package com.app\r\n\r\nclass A\r\n");
        assert_eq!(current_package(&rewritten), Some("com.app"));
    }

    #[test]
    fn package_word_inside_code_is_ignored() {
        let source = "class A {\n    val s = \"package com.fake\"\n}\n";
        assert_eq!(current_package(source), None);
    }

    #[rstest]
    #[case("com.app", "", "com.app")]
    #[case("com.app", "charts", "com.app.charts")]
    #[case("com.app", "charts/line", "com.app.charts.line")]
    #[case("com.app", "./charts", "com.app.charts")]
    fn subpackage_joins_directories(#[case] base: &str, #[case] rel: &str, #[case] expected: &str) {
        assert_eq!(subpackage(base, Path::new(rel)), expected);
    }
}
