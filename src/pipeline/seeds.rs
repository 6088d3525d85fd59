//! Seed file reading
//!
//! The seed file is UTF-8 text with one region listing URL per line. The
//! number of lines consumed is capped by `max-regions` (<= 0 = unlimited).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads seed URLs from a file, up to `max_regions` entries
///
/// Lines are trimmed; blank lines are skipped and do not count against the
/// cap. A missing or unreadable file is fatal to the run.
///
/// # Arguments
///
/// * `path` - Path to the seed file
/// * `max_regions` - Maximum URLs to read (<= 0 = read all)
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The seed URLs in file order
/// * `Err(std::io::Error)` - File could not be opened or read
pub fn read_seed_urls(path: &Path, max_regions: i64) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        urls.push(url.to_string());
        if max_regions > 0 && urls.len() as i64 >= max_regions {
            break;
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seed_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_all_lines_when_unlimited() {
        let file = seed_file("https://a.example\nhttps://b.example\nhttps://c.example\n");
        let urls = read_seed_urls(file.path(), 0).unwrap();
        assert_eq!(urls.len(), 3);

        let urls = read_seed_urls(file.path(), -1).unwrap();
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn test_cap_limits_lines_read() {
        let file = seed_file("https://a.example\nhttps://b.example\nhttps://c.example\n");
        let urls = read_seed_urls(file.path(), 2).unwrap();
        assert_eq!(
            urls,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_cap_larger_than_file_reads_everything() {
        let file = seed_file("https://a.example\n");
        let urls = read_seed_urls(file.path(), 10).unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let file = seed_file("https://a.example\n\n  \nhttps://b.example\n");
        let urls = read_seed_urls(file.path(), 2).unwrap();
        assert_eq!(
            urls,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_seed_urls(Path::new("/nonexistent/seeds.txt"), 0);
        assert!(result.is_err());
    }
}
