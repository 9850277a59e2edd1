use crate::areas::repository::Repository;
use crate::artifacts::status::report::StatusReport;
use colored::Colorize;

impl Repository {
    pub async fn status(&self) -> anyhow::Result<()> {
        let (_, head) = self.head_commit()?;
        let report = {
            let staging = self.staging();
            let staging = staging.lock().await;
            StatusReport::new(&head, &staging, self.workspace())?
        };

        let current_branch = self.refs().current_branch()?;
        let branches = self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|branch| match branch == current_branch {
                true => format!("*{branch}"),
                false => branch.to_string(),
            })
            .collect::<Vec<_>>();
        self.print_section("Branches", branches)?;

        self.print_section("Staged Files", report.staged().to_vec())?;
        self.print_section("Removed Files", report.removed().to_vec())?;
        self.print_section(
            "Modifications Not Staged For Commit",
            report
                .modified()
                .map(|(name, modification)| format!("{name} ({modification})"))
                .collect(),
        )?;
        self.print_section("Untracked Files", report.untracked().to_vec())?;

        Ok(())
    }

    fn print_section(&self, title: &str, lines: Vec<String>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("=== {title} ===").bold())?;
        for line in lines {
            writeln!(self.writer(), "{line}")?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
