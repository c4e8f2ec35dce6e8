use anyhow::Context;

/// GitHub API client authenticated with a personal token.
pub struct Client {
    octocrab: octocrab::Octocrab,
}

impl Client {
    pub fn new() -> anyhow::Result<Self> {
        let token = fetch_token()?;
        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token)
            .build()
            .context("failed to build GitHub client")?;
        Ok(Self { octocrab })
    }

    pub(crate) fn octocrab(&self) -> &octocrab::Octocrab {
        &self.octocrab
    }
}

fn fetch_token() -> anyhow::Result<String> {
    if let Some(token) = token_from_env() {
        return Ok(token);
    }
    if let Some(token) = token_from_gh()? {
        return Ok(token);
    }

    anyhow::bail!("GitHub token not found. Please set `GITHUB_TOKEN` or log in with `gh auth login`.")
}

fn token_from_env() -> Option<String> {
    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(key) {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    None
}

fn token_from_gh() -> anyhow::Result<Option<String>> {
    let output = match std::process::Command::new("gh")
        .args(["auth", "token", "--secure-storage", "--hostname", "github.com"])
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("failed to execute `gh auth token`"),
    };

    if !output.status.success() {
        return Ok(None);
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if token.is_empty() { None } else { Some(token) })
}
