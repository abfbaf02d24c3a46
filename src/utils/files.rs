use std::path::Path;

use tokio::{
    fs::{self, File},
    io::{self, AsyncBufReadExt, Lines},
};

/// Read the non-blank lines of a file, trimmed of surrounding whitespace
pub async fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let mut r = line_reader(path).await?;
    let mut lines = Vec::new();

    while let Some(line) = r.next_line().await? {
        let line = line.trim();

        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}

/// Read a whole file into a string
pub async fn read_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    fs::read_to_string(path).await
}

async fn line_reader<P: AsRef<Path>>(path: P) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn skips_blank_lines() -> io::Result<()> {
        let path = std::env::temp_dir().join(format!("reviews-{}.txt", std::process::id()));
        fs::write(&path, "a great movie\n\n   \n  not worth watching  \n").await?;

        let lines = read_lines(&path).await?;
        fs::remove_file(&path).await?;

        assert_eq!(lines, vec!["a great movie", "not worth watching"]);

        Ok(())
    }

    #[tokio::test]
    async fn fails_on_missing_files() {
        let result = read_lines("/definitely/not/here.txt").await;

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
