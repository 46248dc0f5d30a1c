#![allow(dead_code)]

pub mod scowl {
    //! A throwaway SCOWL checkout: Copyright, README.md, a word table and
    //! stub builder scripts under `speller/`.

    use scowl_create::config::ServiceConfig;
    use scowl_create::pipeline::CreateContext;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    pub const REVISION: &str = "Mon Jan 1 00:00:00 2024 +0000 [abc1234]";

    pub const COPYRIGHT: &str = "SCOWL base copyright.\n\n=== AU\nAU clause text.\n\n=== UKACD\nUKACD clause text.\n";

    pub const README: &str = "# SCOWL\n\nSpell Checker Oriented Word Lists.\n";

    pub const WORDS: &str = "\
# word\tsize\tspellings\tvariant\tcategory
color\t35\tAC\t0
colour\t35\tBZD\t0
organize\t50\tAZC\t0
organise\t50\tBD\t0
café\t50\t*\t1
résumé\t60\t*\t1
naïve\t60\t*\t0
grepped\t60\t*\t0\thacker
xiv\t60\t*\t0\troman-numerals
Œuvre\t70\t*\t0
zymurgy\t85\t*\t0
";

    /// Writes parms.txt, its arguments and stdin into the expected artifact.
    const HUNSPELL_OK: &str = r#"#!/bin/sh
out="hunspell-$2.zip"
{ echo "args=$*"; cat "$3"; echo "---"; cat; } > "$out"
"#;

    const ASPELL_OK: &str = r#"#!/bin/sh
{ echo "args=$*"; cat "$2"; echo "---"; cat; } > aspell6-en-custom.tar.bz2
"#;

    const BUILDER_FAILS: &str = r#"#!/bin/sh
echo "workspace=$(pwd)" >&2
echo "affix compression failed" >&2
exit 1
"#;

    pub struct ScowlFixture {
        pub dir: TempDir,
    }

    impl ScowlFixture {
        pub fn new() -> Self {
            Self::build(HUNSPELL_OK, ASPELL_OK)
        }

        /// Both builder scripts exit non-zero.
        pub fn with_failing_builders() -> Self {
            Self::build(BUILDER_FAILS, BUILDER_FAILS)
        }

        fn build(hunspell: &str, aspell: &str) -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();
            fs::write(root.join("Copyright"), COPYRIGHT).unwrap();
            fs::write(root.join("README.md"), README).unwrap();
            fs::write(root.join("wordlist.tsv"), WORDS).unwrap();
            fs::create_dir_all(root.join("speller")).unwrap();
            install(&root.join("speller/make-hunspell-dict"), hunspell);
            install(&root.join("speller/make-aspell-custom"), aspell);
            Self { dir }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn config(&self) -> ServiceConfig {
            let mut config = ServiceConfig::default();
            config.scowl.root = self.root().to_path_buf();
            config.scowl.revision = Some(REVISION.to_string());
            config
        }

        pub fn context(&self) -> CreateContext {
            CreateContext::from_config(&self.config()).unwrap()
        }
    }

    fn install(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }
}

pub mod http {
    //! Minimal HTTP/1.1 client over a raw TcpStream.

    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    #[derive(Debug)]
    pub struct HttpResponse {
        pub status: u16,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl HttpResponse {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }

        pub fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    pub fn send_request(addr: &SocketAddr, method: &str, target: &str) -> HttpResponse {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        let req = format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        stream.write_all(req.as_bytes()).unwrap();

        let mut buf = Vec::new();
        let mut tmp = [0u8; 4096];
        let header_end = loop {
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos;
            }
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&tmp[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let mut lines = head.split("\r\n");
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap();
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);

        let mut body = buf[header_end + 4..].to_vec();
        while body.len() < length {
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "connection closed before body");
            body.extend_from_slice(&tmp[..n]);
        }
        body.truncate(length);
        HttpResponse {
            status,
            headers,
            body,
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }
}

pub mod archives {
    use std::io::{Cursor, Read};

    /// `(name, contents)` of every tarball member, in archive order.
    pub fn tar_gz_members(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(bytes));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let name = entry.path().unwrap().to_string_lossy().into_owned();
                let mut data = Vec::new();
                entry.read_to_end(&mut data).unwrap();
                (name, data)
            })
            .collect()
    }

    /// `(name, contents)` of every zip member, in archive order.
    pub fn zip_members(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut data = Vec::new();
                file.read_to_end(&mut data).unwrap();
                (file.name().to_string(), data)
            })
            .collect()
    }
}

pub mod test_server {
    use std::sync::Once;

    static MAY_INIT: Once = Once::new();

    /// Configure the may runtime once per test binary.
    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x10000);
        });
    }
}
