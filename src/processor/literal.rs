//! A small word-tree grammar used by the replay binary and the tests.
//!
//! Commands are space-separated words. Each word is either a literal or a
//! `<name>` placeholder accepting any number.

use anyhow::bail;

use super::CommandProcessor;
use crate::annotate::AnnotationSink;
use crate::theme::Color;

/// Color of the first word of a command
const COMMAND_COLOR: Color = Color::from_argb_u32(0xFF00DD33);

/// Colors cycled through for later words, indexed by word position
const ARGUMENT_COLORS: [Color; 5] = [
    Color::from_argb_u32(0xFFFFFF00),
    Color::from_argb_u32(0xFFFF2222),
    Color::from_argb_u32(0xFF00BBFF),
    Color::from_argb_u32(0xFFFF88AA),
    Color::from_argb_u32(0xFF00FFFF),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Literal(String),
    Number(String),
}

impl Matcher {
    fn parse(segment: &str) -> Self {
        match segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            Some(name) => Matcher::Number(name.to_string()),
            None => Matcher::Literal(segment.to_string()),
        }
    }

    fn matches(&self, word: &str) -> bool {
        match self {
            Matcher::Literal(name) => name == word,
            Matcher::Number(_) => word.parse::<f64>().is_ok(),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    matcher: Matcher,
    children: Vec<usize>,
    executable: bool,
}

/// Tree of accepted commands. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct LiteralTree {
    nodes: Vec<Node>,
}

impl LiteralTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                matcher: Matcher::Literal(String::new()),
                children: Vec::new(),
                executable: false,
            }],
        }
    }

    /// Register a command path such as `"easing poly_in <power>"`.
    ///
    /// Every prefix of a registered path that is itself registered is
    /// executable; other prefixes are not.
    pub fn command(mut self, path: &str) -> Self {
        let mut node = 0;
        for segment in path.split_whitespace() {
            let matcher = Matcher::parse(segment);
            node = match self.nodes[node]
                .children
                .iter()
                .copied()
                .find(|&c| self.nodes[c].matcher == matcher)
            {
                Some(existing) => existing,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(Node {
                        matcher,
                        children: Vec::new(),
                        executable: false,
                    });
                    self.nodes[node].children.push(idx);
                    idx
                }
            };
        }
        if node != 0 {
            self.nodes[node].executable = true;
        }
        self
    }

    /// Scene and easing commands
    pub fn demo() -> Self {
        let mut tree = Self::new()
            .command("scene arrow")
            .command("scene circle")
            .command("easing bezier_1d")
            .command("easing bezier_1d <p1y> <p2y>")
            .command("easing bezier_2d")
            .command("easing bezier_2d <p1x> <p1y> <p2x> <p2y>");
        for name in ["hyper_in", "hyper_out", "hyper_in_out", "poly_in", "poly_out", "poly_in_out"] {
            tree = tree
                .command(&format!("easing {}", name))
                .command(&format!("easing {} <arg>", name));
        }
        for family in ["sin", "quad", "cubic", "quart", "quint", "circ"] {
            for kind in ["in", "out", "in_out"] {
                tree = tree.command(&format!("easing {}_{}", family, kind));
            }
        }
        tree.command("easing linear")
    }

    fn child_matching(&self, parent: usize, word: &str) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].matcher.matches(word))
    }

    /// Match words against the tree until one fails.
    ///
    /// A last word that is still the prefix of a literal is left pending
    /// rather than reported.
    fn parse<'a>(&self, text: &'a str) -> Parse<'a> {
        let mut parse = Parse {
            tokens: tokenize(text),
            matched: Vec::new(),
            failure: None,
        };

        let mut node = 0;
        let count = parse.tokens.len();
        for (i, token) in parse.tokens.iter().enumerate() {
            if token.text.is_empty() {
                if i + 1 < count {
                    parse.failure = Some((token.start, token.start + 1, "Unexpected space".into()));
                }
                break;
            }
            match self.child_matching(node, token.text) {
                Some(child) => {
                    node = child;
                    parse.matched.push(child);
                }
                None if i + 1 == count && self.has_literal_prefix(node, token.text) => break,
                None => {
                    let message = if self.nodes[node].children.is_empty() {
                        format!("Unexpected argument '{}'", token.text)
                    } else {
                        format!("Unknown argument '{}'", token.text)
                    };
                    parse.failure = Some((token.start, token.end, message));
                    break;
                }
            }
        }
        parse
    }

    /// Whether some literal child of `parent` starts with `prefix`
    fn has_literal_prefix(&self, parent: usize, prefix: &str) -> bool {
        self.nodes[parent].children.iter().any(|&c| match &self.nodes[c].matcher {
            Matcher::Literal(name) => name.starts_with(prefix),
            Matcher::Number(_) => false,
        })
    }

    fn is_executable(&self, node: usize) -> bool {
        self.nodes[node].executable
    }
}

impl Default for LiteralTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A word and its character range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

struct Parse<'a> {
    tokens: Vec<Token<'a>>,
    /// Node matched by each leading token
    matched: Vec<usize>,
    failure: Option<(usize, usize, String)>,
}

/// Split on single spaces, keeping empty words so offsets stay exact
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut char_pos = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        tokens.push(Token {
            start: char_pos,
            end: char_pos + len,
            text: word,
        });
        char_pos += len + 1;
    }
    tokens
}

/// Processor backed by a [`LiteralTree`], recording executed commands.
#[derive(Debug, Clone, Default)]
pub struct LiteralProcessor {
    tree: LiteralTree,
    executed: Vec<String>,
}

impl LiteralProcessor {
    pub fn new(tree: LiteralTree) -> Self {
        Self {
            tree,
            executed: Vec::new(),
        }
    }

    /// Lines successfully executed, oldest first
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl CommandProcessor for LiteralProcessor {
    fn process(
        &mut self,
        text: &str,
        caret: usize,
        sink: &mut dyn AnnotationSink,
    ) -> anyhow::Result<()> {
        let parse = self.tree.parse(text);

        if let Some((from, to, message)) = &parse.failure {
            sink.problem(*from, *to, message);
        }

        for (i, token) in parse.tokens.iter().take(parse.matched.len()).enumerate() {
            let color = if i == 0 {
                COMMAND_COLOR
            } else {
                ARGUMENT_COLORS[i % ARGUMENT_COLORS.len()]
            };
            sink.highlight(token.start, token.end, color);
        }

        // Suggest children of the node before the word under the caret
        let Some(word) = parse
            .tokens
            .iter()
            .position(|t| t.start <= caret && caret <= t.end)
        else {
            return Ok(());
        };
        if word > parse.matched.len() {
            return Ok(());
        }
        let parent = match word {
            0 => 0,
            n => parse.matched[n - 1],
        };
        let token = parse.tokens[word];
        let prefix: String = token.text.chars().take(caret - token.start).collect();
        for &child in &self.tree.nodes[parent].children {
            if let Matcher::Literal(name) = &self.tree.nodes[child].matcher {
                if name.starts_with(&prefix) {
                    sink.suggest(token.start, name);
                }
            }
        }
        Ok(())
    }

    fn on_command(&mut self, text: &str) -> anyhow::Result<()> {
        let parse = self.tree.parse(text);
        if let Some((from, _, message)) = parse.failure {
            bail!("{} at position {}", message, from);
        }
        match parse.matched.last() {
            Some(&node) if self.tree.is_executable(node) => {
                tracing::info!("Executed command: {}", text);
                self.executed.push(text.to_string());
                Ok(())
            }
            _ => bail!("Incomplete command"),
        }
    }
}
