use super::{LexMode, Tokenizer};
use crate::token::TokenKind;

/// Drive the tokenizer the way the parser does: flip to inside-tag mode
/// after consuming a tag start, back outside after `>` or `/>`. Collects
/// (kind, lexeme) pairs up to and including the first `Eof` or `Error`.
fn drive(source: &str) -> Vec<(TokenKind, String)> {
    let mut tokenizer = Tokenizer::new(source);
    let mut out = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let kind = token.kind;
        out.push((kind, token.lexeme));
        match kind {
            TokenKind::Eof | TokenKind::Error => break,
            TokenKind::OpenTagStart | TokenKind::CloseTagStart => {
                tokenizer.set_mode(LexMode::InsideTag);
            }
            TokenKind::Gt | TokenKind::SelfClose => {
                tokenizer.set_mode(LexMode::OutsideTag);
            }
            _ => {}
        }
    }
    out
}

fn kinds(source: &str) -> Vec<TokenKind> {
    drive(source).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn tokenizes_a_tag_with_attributes_and_text() {
    let tokens = drive("<p id=\"main\">Hello</p><img src=\"a.jpg\" />");
    let expected: Vec<(TokenKind, &str)> = vec![
        (TokenKind::OpenTagStart, "p"),
        (TokenKind::AttrName, "id"),
        (TokenKind::AttrEquals, "="),
        (TokenKind::AttrValue, "main"),
        (TokenKind::Gt, ">"),
        (TokenKind::Text, "Hello"),
        (TokenKind::CloseTagStart, "p"),
        (TokenKind::Gt, ">"),
        (TokenKind::OpenTagStart, "img"),
        (TokenKind::AttrName, "src"),
        (TokenKind::AttrEquals, "="),
        (TokenKind::AttrValue, "a.jpg"),
        (TokenKind::SelfClose, "/>"),
        (TokenKind::Eof, ""),
    ];
    let got: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|(kind, lexeme)| (*kind, lexeme.as_str()))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn eof_is_idempotent() {
    let mut tokenizer = Tokenizer::new("");
    for _ in 0..3 {
        assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
    }
}

#[test]
fn whitespace_only_input_yields_eof() {
    assert_eq!(kinds(" \t\r\n  "), vec![TokenKind::Eof]);
}

#[test]
fn comments_are_skipped_in_both_modes() {
    assert_eq!(
        kinds("<!-- a -->text<!-- b -->"),
        vec![TokenKind::Text, TokenKind::Eof]
    );
    let tokens = drive("<p <!-- note --> id=\"x\">");
    let got: Vec<TokenKind> = tokens.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::OpenTagStart,
            TokenKind::AttrName,
            TokenKind::AttrEquals,
            TokenKind::AttrValue,
            TokenKind::Gt,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_comment_silently_consumes_to_eof() {
    assert_eq!(kinds("before<!-- never closed"), vec![TokenKind::Text, TokenKind::Eof]);
}

#[test]
fn comment_close_is_matched_non_greedily() {
    // The first `-->` ends the comment even with another one later.
    assert_eq!(
        drive("<!-- a --> mid <!-- b -->"),
        vec![
            (TokenKind::Text, "mid ".to_string()),
            (TokenKind::Eof, String::new()),
        ]
    );
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let tokens = drive("<p id=\"x>");
    let (kind, message) = tokens.last().expect("at least one token").clone();
    assert_eq!(kind, TokenKind::Error);
    assert_eq!(message, "unterminated string literal");
}

#[test]
fn single_quoted_values_work_and_exclude_quotes() {
    let tokens = drive("<p title='a \"b\"'>");
    assert!(tokens.contains(&(TokenKind::AttrValue, "a \"b\"".to_string())));
}

#[test]
fn lone_slash_inside_tag_is_an_error() {
    let tokens = drive("<p / >");
    assert_eq!(
        tokens.last(),
        Some(&(TokenKind::Error, "unexpected '/'".to_string()))
    );
}

#[test]
fn stray_byte_inside_tag_is_an_error() {
    let tokens = drive("<p ?>");
    assert_eq!(
        tokens.last(),
        Some(&(TokenKind::Error, "unexpected character inside tag".to_string()))
    );
}

#[test]
fn lt_followed_by_non_letter_is_invalid_tag_syntax() {
    for source in ["<3", "< p>", "</>", "</ p>", "<!doctype>", "<"] {
        let tokens = drive(source);
        assert_eq!(
            tokens.last(),
            Some(&(TokenKind::Error, "invalid tag syntax".to_string())),
            "source: {source:?}"
        );
    }
}

#[test]
fn names_take_letters_digits_and_hyphens() {
    let tokens = drive("<my-tag data-x1=\"v\">");
    assert_eq!(tokens[0], (TokenKind::OpenTagStart, "my-tag".to_string()));
    assert_eq!(tokens[1], (TokenKind::AttrName, "data-x1".to_string()));
}

#[test]
fn close_tag_lexeme_is_the_bare_name() {
    let tokens = drive("</section>");
    assert_eq!(tokens[0], (TokenKind::CloseTagStart, "section".to_string()));
}

#[test]
fn text_runs_to_the_next_lt_and_keeps_interior_whitespace() {
    let tokens = drive("Hello, world \n<b>");
    assert_eq!(tokens[0], (TokenKind::Text, "Hello, world \n".to_string()));
}

#[test]
fn leading_whitespace_before_a_token_is_skipped() {
    let tokens = drive("   Hello");
    assert_eq!(tokens[0], (TokenKind::Text, "Hello".to_string()));
}

#[test]
fn text_lexemes_are_owned_decoded_copies() {
    let tokens = drive("héllo wörld<b>");
    assert_eq!(tokens[0], (TokenKind::Text, "héllo wörld".to_string()));
}

#[test]
fn positions_are_one_based_and_track_newlines() {
    let mut tokenizer = Tokenizer::new("ab\n<p>");
    let text = tokenizer.next_token();
    assert_eq!((text.line, text.column), (1, 1));

    let open = tokenizer.next_token();
    assert_eq!(open.kind, TokenKind::OpenTagStart);
    assert_eq!((open.line, open.column), (2, 1));

    tokenizer.set_mode(LexMode::InsideTag);
    let gt = tokenizer.next_token();
    assert_eq!(gt.kind, TokenKind::Gt);
    assert_eq!((gt.line, gt.column), (2, 3));
}

#[test]
fn columns_count_characters_not_bytes() {
    let mut tokenizer = Tokenizer::new("é<p>");
    let text = tokenizer.next_token();
    assert_eq!(text.lexeme, "é");
    let open = tokenizer.next_token();
    // "é" is two bytes but one character.
    assert_eq!((open.line, open.column), (1, 2));
}

#[test]
fn attr_value_position_points_at_the_opening_quote() {
    let mut tokenizer = Tokenizer::new("id=\"x\"");
    tokenizer.set_mode(LexMode::InsideTag);
    let _name = tokenizer.next_token();
    let _eq = tokenizer.next_token();
    let value = tokenizer.next_token();
    assert_eq!(value.kind, TokenKind::AttrValue);
    assert_eq!((value.line, value.column), (1, 4));
}

#[test]
fn mode_is_the_only_disambiguator_for_name_runs() {
    // The same run of letters lexes as Text outside a tag...
    let mut outside = Tokenizer::new("disabled");
    assert_eq!(outside.next_token().kind, TokenKind::Text);
    // ...and as AttrName inside one.
    let mut inside = Tokenizer::new("disabled");
    inside.set_mode(LexMode::InsideTag);
    assert_eq!(inside.next_token().kind, TokenKind::AttrName);
}
