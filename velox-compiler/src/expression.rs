use pest::Parser;
use pest::error::InputLocation;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct ExpressionGrammar;

/// Keywords that can never appear bare in a template expression.
/// `typeof`, `instanceof` and `in` are operators and stay allowed.
pub const PROHIBITED_KEYWORDS: &[&str] = &[
    "do", "if", "for", "let", "new", "try", "var", "case", "else", "with", "await", "break",
    "catch", "class", "const", "super", "throw", "while", "yield", "delete", "export", "import",
    "return", "switch", "default", "extends", "finally", "continue", "debugger", "function",
    "arguments",
];

/// Pieces of a `v-for` value such as `(item, index) in items`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForSyntax {
    pub source: String,
    pub alias: String,
    pub iterator1: Option<String>,
    pub iterator2: Option<String>,
}

/// True when `value` names a callable directly: an identifier followed by
/// `.prop`, `[0]`, `['key']`, `["key"]` or `[ident]` accesses.
pub fn is_simple_path(value: &str) -> bool {
    ExpressionGrammar::parse(Rule::simple_path, value).is_ok()
}

/// Full-match test for a bare identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn is_identifier(name: &str) -> bool {
    ExpressionGrammar::parse(Rule::bare_identifier, name).is_ok()
}

/// Whether `return <exp>` parses as a function body.
///
/// When the parse stops at a token that starts a new line, a `;` is inserted
/// in front of it and the parse is retried, so statements may be separated by
/// line breaks alone.
pub fn is_valid_return_body(exp: &str) -> bool {
    let mut source = exp.to_string();
    let budget = exp.matches(is_line_end).count();
    for _ in 0..=budget {
        let err = match ExpressionGrammar::parse(Rule::return_body, &source) {
            Ok(_) => return true,
            Err(err) => err,
        };
        let pos = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        if !starts_new_line(&source, pos) {
            return false;
        }
        source.insert(pos, ';');
    }
    false
}

fn is_line_end(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

// True when only whitespace separates `pos` from the previous token and that
// whitespace holds a line break.
fn starts_new_line(source: &str, pos: usize) -> bool {
    if pos >= source.len() || source[pos..].starts_with(';') {
        return false;
    }
    let before = &source[..pos];
    let code = before.trim_end();
    !code.is_empty() && before[code.len()..].contains(is_line_end)
}

/// Replaces the text of every quoted string and every template-literal
/// segment with a single space. Code inside `${ }` is kept as is.
pub fn strip_strings(exp: &str) -> String {
    let source = match ExpressionGrammar::parse(Rule::stripped_source, exp) {
        Ok(mut pairs) => match pairs.next() {
            Some(pair) => pair,
            None => return exp.to_string(),
        },
        Err(_) => return exp.to_string(),
    };

    let mut out = String::with_capacity(exp.len());
    let mut last = 0;
    for pair in source.into_inner().flatten() {
        if matches!(pair.as_rule(), Rule::quoted | Rule::template_text) {
            let span = pair.as_span();
            out.push_str(&exp[last..span.start()]);
            out.push(' ');
            last = span.end();
        }
    }
    out.push_str(&exp[last..]);
    out
}

/// First prohibited keyword appearing as a whole word outside of string
/// and template literals.
pub fn find_prohibited_keyword(exp: &str) -> Option<&'static str> {
    strip_strings(exp)
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .find_map(|word| PROHIBITED_KEYWORDS.iter().copied().find(|kw| *kw == word))
}

/// Splits a `v-for` value into its source expression and bound names.
/// Returns `None` when there is no ` in ` / ` of ` separator.
pub fn parse_for(exp: &str) -> Option<ForSyntax> {
    let pair = ExpressionGrammar::parse(Rule::for_syntax, exp).ok()?.next()?;

    let mut out = ForSyntax::default();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::for_alias => out.alias = part.as_str().trim().to_string(),
            Rule::for_source => out.source = part.as_str().trim().to_string(),
            _ => {}
        }
    }

    let iterators: Option<Vec<String>> = ExpressionGrammar::parse(Rule::iterator_list, &out.alias)
        .ok()
        .and_then(|mut pairs| pairs.next())
        .map(|list| list.into_inner().map(|p| p.as_str().to_string()).collect());
    if let Some([alias, iterator1, rest @ ..]) = iterators.as_deref() {
        out.iterator2 = rest
            .first()
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.trim().to_string());
        out.iterator1 = Some(iterator1.trim().to_string());
        out.alias = alias.trim().to_string();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_paths() {
        for ok in [
            "foo",
            "  foo.bar ",
            "a['b c']",
            "a[\"x\"]",
            "a[0].b",
            "a[key]",
            "$vm._x",
            "a['b']c']",
            "a['b'].c['d']",
        ] {
            assert!(is_simple_path(ok), "{ok} should be a simple path");
        }
        for bad in ["foo()", "a + b", "1abc", "a[b + 1]", "a.", "a['x\ny']", "a['b']c", "café", ""] {
            assert!(!is_simple_path(bad), "{bad} should not be a simple path");
        }
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("item"));
        assert!(is_identifier("_$x1"));
        assert!(!is_identifier("123abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(" a"));
    }

    #[test]
    fn return_bodies() {
        for ok in [
            "",
            "a + b * c",
            "count++; doThing($event)",
            "ok ? 'yes' : `no ${reason}`",
            "items.filter(i => i.done).length",
            "new Date().getTime()",
            "typeof x === 'string' && key in obj",
            "{ a: 1, [b]: 2, ...rest, c }",
            "list[0]?.name ?? fallback",
            "a = 1; if (a) { b() } else c()",
            "/ab+c/i.test(s)",
            "0xff + 1e3 + .5",
            "foo.new",
            "void 0",
            "(function () { return 1 })()",
            "a = 1\nb()",
            "count++\r\n  log(count) // done\n  reset()",
            "a; if (a) {\n  b()\n  c()\n}",
            "pairs.map(([k, v]) => k)",
            "items.some(({ done, meta: { id } = {} }) => done)",
            "async () => x",
            "async function () { return 1 }",
            "async => async",
            "(a, ...rest) => rest",
            "café + 1",
            "a; throw e",
            "a; for (let i = 0; i < n; i++) sum += i",
            "a; for (const [k, v] of entries) { map[k] = v }",
            "a; while (busy) wait()",
            "a; do tick(); while (busy)",
            "a; switch (k) { case 1: one(); break; default: other() }",
            "a; try { risky() } catch (e) { report(e) } finally { done() }",
            "a; let { x, y = 2 } = point",
        ] {
            assert!(is_valid_return_body(ok), "{ok} should parse");
        }
        for bad in [
            "new",
            "if (a) b",
            "a b",
            "delete",
            "123abc",
            "a +",
            "{{ a }}",
            "var x = 1",
            "(a\nb)",
            "a\n+",
            "a; try { b() }",
            "a; throw",
        ] {
            assert!(!is_valid_return_body(bad), "{bad} should not parse");
        }
    }

    #[test]
    fn strip_keeps_template_substitutions() {
        let out = strip_strings(r#"'new' + "do" + `a ${ b + 'if' } c`"#);
        assert!(!out.contains("new"));
        assert!(!out.contains("do"));
        assert!(!out.contains("if"));
        assert!(out.contains(" b + "));
    }

    #[test]
    fn strip_handles_escapes_and_unterminated() {
        assert_eq!(strip_strings(r#"x + 'it\'s new'"#), "x +  ");
        assert_eq!(strip_strings("'open"), "'open");
    }

    #[test]
    fn keyword_scan_is_whole_word() {
        assert_eq!(find_prohibited_keyword("renew + done"), None);
        assert_eq!(find_prohibited_keyword("a.if + b"), Some("if"));
        assert_eq!(find_prohibited_keyword("'delete' + new"), Some("new"));
    }

    #[test]
    fn for_syntax() {
        let f = parse_for("item in items").unwrap();
        assert_eq!(f.alias, "item");
        assert_eq!(f.source, "items");
        assert_eq!(f.iterator1, None);

        let f = parse_for("(value, key, index) of object").unwrap();
        assert_eq!(f.alias, "value");
        assert_eq!(f.iterator1.as_deref(), Some("key"));
        assert_eq!(f.iterator2.as_deref(), Some("index"));
        assert_eq!(f.source, "object");

        let f = parse_for("({ id, name }, i) in rows").unwrap();
        assert_eq!(f.alias, "{ id, name }");
        assert_eq!(f.iterator1.as_deref(), Some("i"));

        assert!(parse_for("items").is_none());
    }
}
