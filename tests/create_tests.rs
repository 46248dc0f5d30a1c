//! End-to-end tests of the create pipeline against a fixture SCOWL checkout,
//! without the HTTP layer.
#![cfg(unix)]

mod common;

use common::archives::{tar_gz_members, zip_members};
use common::scowl::{ScowlFixture, REVISION};
use scowl_create::error::{CreateError, PackagingError};
use scowl_create::pipeline::{CreateContext, Reply};
use scowl_create::{Payload, QueryParams};
use std::path::Path;

fn download(ctx: &CreateContext, query: &str) -> Payload {
    match ctx.handle(&QueryParams::parse(query)).unwrap() {
        Reply::Download(payload) => payload,
        Reply::Form(_) => panic!("expected a download for {query}"),
    }
}

fn words_of_inline(payload: &Payload) -> Vec<String> {
    let text = String::from_utf8(payload.bytes.clone()).unwrap();
    let (_, words) = text.split_once("\n---\n").unwrap();
    words.lines().map(str::to_string).collect()
}

#[test]
fn test_strip_leaves_no_accents() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let words = words_of_inline(&download(&ctx, "download=wordlist&max_size=70&diacritic=strip"));
    assert!(words.contains(&"cafe".to_string()));
    assert!(words.contains(&"resume".to_string()));
    // Œ is a ligature, not a base letter plus accent
    assert!(words
        .iter()
        .filter(|w| w.as_str() != "Œuvre")
        .all(|w| w.is_ascii()));
}

#[test]
fn test_both_adds_folded_forms() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let words = words_of_inline(&download(&ctx, "download=wordlist&diacritic=both"));
    for (accented, folded) in [("café", "cafe"), ("résumé", "resume"), ("naïve", "naive")] {
        assert!(words.iter().any(|w| w == accented), "missing {accented}");
        assert!(words.iter().any(|w| w == folded), "missing {folded}");
    }
}

#[test]
fn test_same_sorted_words_in_every_format() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let base = "download=wordlist&spelling=US&spelling=GBs&max_size=60&diacritic=keep&special=hacker";

    let inline = words_of_inline(&download(&ctx, base));
    let mut sorted = inline.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(inline, sorted);
    assert!(inline.contains(&"grepped".to_string()));
    assert!(!inline.contains(&"xiv".to_string()));

    let tgz = tar_gz_members(&download(&ctx, &format!("{base}&format=tar.gz")).bytes);
    let zip = zip_members(&download(&ctx, &format!("{base}&format=zip")).bytes);
    let tgz_words = String::from_utf8(tgz[1].1.clone()).unwrap();
    let zip_words = String::from_utf8(zip[1].1.clone()).unwrap();
    assert_eq!(tgz_words.lines().collect::<Vec<_>>(), inline);
    assert_eq!(zip_words.lines().collect::<Vec<_>>(), inline);
}

#[test]
fn test_archives_differ_only_in_container_and_eol() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let base = "download=wordlist&spelling=AU&max_size=85";
    let tgz = tar_gz_members(&download(&ctx, &format!("{base}&format=tar.gz")).bytes);
    let zip = zip_members(&download(&ctx, &format!("{base}&format=zip")).bytes);

    let tgz_names: Vec<&str> = tgz.iter().map(|(n, _)| n.as_str()).collect();
    let zip_names: Vec<&str> = zip.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        tgz_names,
        vec!["SCOWL-wl/README", "SCOWL-wl/words.txt", "SCOWL-wl/README_SCOWL.md"]
    );
    assert_eq!(zip_names, vec!["README", "words.txt", "README_SCOWL.md"]);

    for ((_, lf), (_, crlf)) in tgz.iter().zip(zip.iter()) {
        assert!(!lf.windows(2).any(|w| w == b"\r\n"));
        let normalized: Vec<u8> = {
            let mut out = Vec::with_capacity(crlf.len());
            let mut iter = crlf.iter().peekable();
            while let Some(&b) = iter.next() {
                if b == b'\r' && iter.peek() == Some(&&b'\n') {
                    continue;
                }
                out.push(b);
            }
            out
        };
        assert_eq!(&normalized, lf);
    }
}

#[test]
fn test_archive_readme_carries_header_and_source_readme_is_utf8() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let members = tar_gz_members(
        &download(
            &ctx,
            "download=wordlist&format=tar.gz&encoding=iso-8859-1&diacritic=keep",
        )
        .bytes,
    );
    let readme = String::from_utf8(members[0].1.clone()).unwrap();
    assert!(readme.contains(&format!("Using Git Commit From: {REVISION}")));
    assert!(members[1].1.windows(5).any(|w| w == b"caf\xe9\n"));
    assert_eq!(members[2].1, common::scowl::README.as_bytes());
}

#[test]
fn test_empty_selection_still_ends_each_list_with_a_line_break() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let inline = download(&ctx, "download=wordlist&max_size=0");
    assert!(inline.bytes.ends_with(b"\n---\n\n"));

    let tgz = tar_gz_members(&download(&ctx, "download=wordlist&max_size=0&format=tar.gz").bytes);
    assert_eq!(tgz[1].1, b"\n");
    let zip = zip_members(&download(&ctx, "download=wordlist&max_size=0&format=zip").bytes);
    assert_eq!(zip[1].1, b"\r\n");

    let hunspell = download(&ctx, "download=hunspell&max_size=0");
    assert!(hunspell.bytes.ends_with(b"---\n\n"));
}

#[test]
fn test_au_clause_follows_spelling() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let header = |q: &str| String::from_utf8(download(&ctx, q).bytes).unwrap();
    assert!(header("download=wordlist&spelling=AU").contains("AU clause text."));
    assert!(!header("download=wordlist&spelling=US").contains("AU clause text."));
    assert!(header("download=wordlist&max_size=85").contains("UKACD clause text."));
    assert!(!header("download=wordlist&max_size=80").contains("UKACD clause text."));
}

#[test]
fn test_latin1_rejects_unencodable_word() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let err = ctx
        .handle(&QueryParams::parse(
            "download=wordlist&max_size=70&encoding=iso-8859-1",
        ))
        .unwrap_err();
    match err {
        CreateError::Encoding(e) => {
            assert_eq!(e.code_point, 0x152);
            assert_eq!(e.word, "Œuvre");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // the same list is fine in UTF-8
    assert!(ctx
        .handle(&QueryParams::parse("download=wordlist&max_size=70"))
        .is_ok());
}

#[test]
fn test_hunspell_download_through_stub() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let payload = download(&ctx, "download=hunspell&spelling=GBs&spelling=GBz");
    assert_eq!(payload.filename, Some("hunspell-en_GB-custom.zip"));
    assert_eq!(payload.content_type, "application/zip");
    let text: String = payload.bytes.iter().map(|&b| b as char).collect();
    assert!(text.starts_with("args=-one en_GB-custom parms.txt\nWith Parameters:\n  Size: 60 (default)\n  Spelling: GB\n"));
    assert!(text.ends_with("---\ncafe\ncolour\nnaive\norganise\norganize\nresume\n"));
}

#[test]
fn test_aspell_download_through_stub() {
    let fixture = ScowlFixture::new();
    let ctx = fixture.context();
    let payload = download(&ctx, "download=aspell&spelling=CA&max_variant=0");
    assert_eq!(payload.filename, Some("aspell6-en-custom.tar.bz2"));
    assert_eq!(payload.content_type, "application/octet-stream");
    let text = String::from_utf8(payload.bytes).unwrap();
    assert!(text.starts_with(&format!("args={REVISION} parms.txt\n  Size: 60 (default)\n")));
    assert!(text.contains("  Spelling: CA\n  Variant Level: 1 *default*\n"));
}

#[test]
fn test_failing_builder_reports_stderr_and_cleans_up() {
    let fixture = ScowlFixture::with_failing_builders();
    let ctx = fixture.context();
    let err = ctx
        .handle(&QueryParams::parse("download=hunspell"))
        .unwrap_err();
    assert_eq!(err.status(), 500);
    assert!(err.to_string().contains("affix compression failed"));
    let CreateError::Packaging(PackagingError::Failed { diagnostics, .. }) = &err else {
        panic!("unexpected error: {err:?}");
    };
    let workspace = diagnostics
        .lines()
        .find_map(|l| l.strip_prefix("workspace="))
        .unwrap();
    assert!(!Path::new(workspace).exists());
}

#[test]
fn test_form_uses_configured_vocabulary() {
    let fixture = ScowlFixture::new();
    let mut config = fixture.config();
    config.vocabulary.default_preset = "en_AU".to_string();
    let ctx = CreateContext::from_config(&config).unwrap();
    match ctx.handle(&QueryParams::parse("")).unwrap() {
        Reply::Form(html) => {
            assert!(html.contains("<strong>en_AU</strong>"));
            assert!(html.contains("value=\"AU\" checked>"));
        }
        Reply::Download(_) => panic!("expected the form"),
    }
}
