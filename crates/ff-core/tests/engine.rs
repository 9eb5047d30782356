use ff_compiler::strip_comments;
use ff_core::{Decision, FilterEngine, Settings, SocialMediaEntry};

#[derive(Default)]
struct MockEntry {
    text: String,
    reacted_by: Option<String>,
    suggested: bool,
    credentials: bool,
}

impl MockEntry {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    fn reacted_by(mut self, name: &str) -> Self {
        self.reacted_by = Some(name.to_string());
        self
    }

    fn suggested(mut self) -> Self {
        self.suggested = true;
        self
    }
}

impl SocialMediaEntry for MockEntry {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn reacted_by_name(&self) -> Option<String> {
        self.reacted_by.clone()
    }

    fn is_suggested(&self) -> bool {
        self.suggested
    }

    fn contains_content_credentials(&self) -> bool {
        self.credentials
    }
}

fn engine(patterns: &str) -> FilterEngine {
    FilterEngine::new(Settings {
        filter_patterns: patterns.to_string(),
        ..Settings::default()
    })
}

#[test]
fn empty_and_comment_only_documents_decide_nothing() {
    for patterns in ["", "\n\n", "; comment 1\n\n   ; comment 2\n"] {
        let engine = engine(patterns);
        assert_eq!(engine.decide(&MockEntry::new("any content")), Decision::Nothing);
    }
}

#[test]
fn first_match_wins() {
    let engine = engine("spam\n!spam");
    assert!(engine.decide(&MockEntry::new("This is spam")).is_hide());
}

#[test]
fn negation_inversion() {
    let engine = engine("!important");
    assert_eq!(
        engine.decide(&MockEntry::new("this is important")),
        Decision::Show {
            reason: "Matches pattern: important".into()
        }
    );
    assert_eq!(engine.decide(&MockEntry::new("no relation")), Decision::Nothing);
}

#[test]
fn literal_word_boundary() {
    let engine = engine("hello");
    assert!(engine.should_hide(&MockEntry::new("say hello there")));
    assert!(!engine.should_hide(&MockEntry::new("helloworld")));
    assert!(!engine.should_hide(&MockEntry::new("sayhello")));
}

#[test]
fn regex_directives_with_flags() {
    let engine = engine("/sp[ae]m/");
    assert!(engine.should_hide(&MockEntry::new("This is spem")));
    assert!(!engine.should_hide(&MockEntry::new("This is spim")));
    assert!(!engine.should_hide(&MockEntry::new("This is SPAM")));

    let engine = self::engine("/SPAM/i");
    assert!(engine.should_hide(&MockEntry::new("This is SpAm")));
}

#[test]
fn regex_is_unicode_aware() {
    let engine = engine("/emoji/");
    assert!(engine.should_hide(&MockEntry::new("Check out this emoji 😀")));

    let engine = self::engine("/^.$/");
    assert!(engine.should_hide(&MockEntry::new("😀")));
}

#[test]
fn invalid_regex_is_dropped() {
    let engine = engine("/[invalid/\nspam");
    assert_eq!(engine.pattern().directive_count(), 1);
    assert_eq!(engine.decide(&MockEntry::new("[invalid")), Decision::Nothing);
    assert!(engine.should_hide(&MockEntry::new("spam")));
}

#[test]
fn curly_quotes_are_normalized() {
    let engine = engine("don't");
    for text in ["don\u{2018}t do this", "don\u{2019}t do this", "don't do this"] {
        assert!(engine.should_hide(&MockEntry::new(text)), "{text}");
    }

    let engine = self::engine("\"quoted\"");
    assert!(engine.should_hide(&MockEntry::new("This is \u{201C}quoted\u{201D} text")));
    assert!(engine.should_hide(&MockEntry::new("This is \"quoted\" text")));
}

#[test]
fn comment_stripping_examples() {
    assert_eq!(strip_comments("/;[0-9]+/; comment"), "/;[0-9]+/");
    assert_eq!(strip_comments("foo\\;bar\\;baz; comment"), "foo;bar;baz");

    let engine = engine("/;[0-9]+/ ; numbered semicolons\nfoo\\;bar ; escaped");
    assert!(engine.should_hide(&MockEntry::new("item;42")));
    assert!(engine.should_hide(&MockEntry::new("say foo;bar now")));
    assert_eq!(engine.decide(&MockEntry::new("foo bar")), Decision::Nothing);
}

#[test]
fn settings_only_apply_when_inconclusive() {
    let engine = FilterEngine::new(Settings {
        filter_patterns: "!allowed".into(),
        hide_suggested: true,
        ..Settings::default()
    });

    let entry = MockEntry::new("this is allowed content").suggested();
    assert!(matches!(engine.decide(&entry), Decision::Show { .. }));

    let entry = MockEntry::new("something else").suggested();
    assert_eq!(
        engine.decide(&entry),
        Decision::Hide {
            reason: "Post is suggested".into()
        }
    );
}

#[test]
fn react_scoping() {
    let engine = engine("!$react John\nspam");

    assert!(matches!(
        engine.decide(&MockEntry::new("spam").reacted_by("John Doe")),
        Decision::Show { .. }
    ));
    assert_eq!(
        engine.decide(&MockEntry::new("spam").reacted_by("Mary Sue")),
        Decision::Hide {
            reason: "Matches pattern: spam".into()
        }
    );
    assert!(engine.should_hide(&MockEntry::new("spam")));
}

#[test]
fn react_hide_reason() {
    let engine = engine("$react /^Recruiter/");
    assert_eq!(
        engine.decide(&MockEntry::new("hiring!").reacted_by("Recruiter Bob")),
        Decision::Hide {
            reason: "Reacted by user: /^Recruiter/".into()
        }
    );
}

#[test]
fn compiling_twice_is_deterministic() {
    let patterns = "!important\n  /ad(vert)?s?/i\nspam\n$react Mary";
    let first = engine(patterns);
    let second = engine(patterns);

    let entries = [
        MockEntry::new("important ads"),
        MockEntry::new("Adverts here"),
        MockEntry::new("spam"),
        MockEntry::new("post").reacted_by("Mary Sue"),
        MockEntry::new("nothing to see"),
    ];

    for entry in &entries {
        assert_eq!(first.decide(entry), second.decide(entry));
        assert_eq!(first.decide(entry), first.decide(entry));
    }
}

#[test]
fn indented_directives_still_evaluate_in_document_order() {
    let engine = engine("news\n  !good news\nbad");
    assert_eq!(
        engine.decide(&MockEntry::new("good news")),
        Decision::Hide {
            reason: "Matches pattern: news".into()
        }
    );
    assert!(matches!(
        engine.decide(&MockEntry::new("good bad")),
        Decision::Hide { .. }
    ));
}
