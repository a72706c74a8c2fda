use anyhow::{Context, Result};
use git2::{Repository, Signature, Time};
use std::path::Path;
use std::sync::Mutex;

/// Git operations for version-controlling the data file
///
/// Detects whether the data file lives inside a git repository. When it
/// does, every save can be committed with an operation-specific message,
/// and pull/push keep a remote in sync. When it does not, every operation
/// is a no-op.
pub struct GitOps {
    repo: Option<Mutex<Repository>>,
}

impl GitOps {
    /// Create a new GitOps instance by probing the path for a repository
    pub fn new(file_path: &Path) -> Self {
        let file_dir = if file_path.is_file() {
            file_path.parent().unwrap_or(file_path).to_path_buf()
        } else {
            file_path.to_path_buf()
        };

        let repo = Repository::discover(&file_dir).ok().map(Mutex::new);
        Self { repo }
    }

    /// Check if the data file is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    /// Pull changes from the remote repository (fast-forward only)
    pub fn pull(&self) -> Result<()> {
        let repo = match &self.repo {
            Some(r) => r.lock().unwrap(),
            None => return Ok(()),
        };

        let head = repo.head().context("Failed to get HEAD")?;
        let branch_name = head
            .shorthand()
            .context("Failed to get branch name")?
            .to_string();

        let mut remote = repo
            .find_remote("origin")
            .context("Failed to find remote 'origin'")?;
        remote
            .fetch(&[&branch_name], None, None)
            .context("Failed to fetch from origin")?;

        let fetch_head = repo.find_reference("FETCH_HEAD")?;
        let fetch_commit = repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = repo.merge_analysis(&[&fetch_commit])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }

        if analysis.is_fast_forward() {
            let refname = format!("refs/heads/{}", branch_name);
            let mut reference = repo.find_reference(&refname)?;
            reference.set_target(fetch_commit.id(), "Fast-forward")?;
            repo.set_head(&refname)?;
            repo.checkout_head(Some(git2::build::CheckoutBuilder::default().force()))?;
        } else if analysis.is_normal() {
            // Diverged histories mean a concurrent writer got there first;
            // the operator resolves the conflict, we do not auto-merge.
            return Err(anyhow::anyhow!(
                "Merge required but automatic merge is not supported. Please resolve manually."
            ));
        }

        Ok(())
    }

    /// Commit the data file with the given message
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<()> {
        let repo = match &self.repo {
            Some(r) => r.lock().unwrap(),
            None => return Ok(()),
        };

        let repo_workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let relative_path = file_path
            .strip_prefix(repo_workdir)
            .context("Data file is not in repository")?;

        let mut index = repo.index()?;
        index.add_path(relative_path)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let parent_commit = match repo.head() {
            Ok(head) => {
                let oid = head.target().context("HEAD has no target")?;
                Some(repo.find_commit(oid)?)
            }
            Err(_) => None, // Initial commit
        };

        let signature = Self::get_signature(&repo)?;
        let parents: Vec<_> = parent_commit.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(())
    }

    /// Push the current branch to the remote repository
    pub fn push(&self) -> Result<()> {
        let repo = match &self.repo {
            Some(r) => r.lock().unwrap(),
            None => return Ok(()),
        };

        let head = repo.head().context("Failed to get HEAD")?;
        let branch_name = head
            .shorthand()
            .context("Failed to get branch name")?
            .to_string();

        let mut remote = repo
            .find_remote("origin")
            .context("Failed to find remote 'origin'")?;
        let refspec = format!("refs/heads/{}", branch_name);
        remote.push(&[&refspec], None)?;

        Ok(())
    }

    /// Get or create a git signature for commits
    fn get_signature(repo: &Repository) -> Result<Signature<'_>> {
        let config = repo.config()?;

        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "Daylog MCP Server".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "daylog-mcp@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            Err(_) => {
                // Some CI systems cannot produce a current timestamp
                let time = Time::new(1_700_000_000, 0);
                Signature::new(&name, &email, &time)
                    .context("Failed to create signature with fixed time")
            }
        }
    }
}
