use std::io::{self, BufRead, Write};
use std::sync::Arc;
use nb_core::{is_valid_url, ContactInfo, ContactStorage};
use nb_scrapers::{ResearchEvent, ResearchManager};
use crate::display;

const GOODBYE: &str = "👋 Thanks for using Networking Assistant! Keep building those connections!";

/// The interactive view/delete/add/exit loop.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask a question and return the trimmed answer. End of input is an error.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn prompt_required(&mut self, label: &str, field: &str) -> io::Result<String> {
        loop {
            let value = self.prompt(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "❌ {} is required. Please try again.", field)?;
        }
    }

    fn prompt_url(&mut self, label: &str, field: &str) -> io::Result<String> {
        loop {
            let value = self.prompt(label)?;
            if value.is_empty() || is_valid_url(&value) {
                return Ok(value);
            }
            writeln!(self.output, "❌ Please enter a valid {} URL or leave blank.", field)?;
        }
    }

    pub fn prompt_contact(&mut self) -> io::Result<ContactInfo> {
        writeln!(self.output, "\n{}", display::banner("📝 CONTACT INFORMATION"))?;
        let name = self.prompt_required("👤 Full name (required): ", "Name")?;
        let company = self.prompt_required("🏢 Company name (required): ", "Company name")?;
        let role = self.prompt("💼 Their role/job title: ")?;
        let linkedin = self.prompt_url("🔗 LinkedIn profile URL: ", "LinkedIn")?;
        let website = self.prompt_url("🌐 Company website URL: ", "website")?;
        let industry = self.prompt("🏭 Industry keyword (for news search): ")?;

        Ok(ContactInfo::new(name, company)
            .with_role(role)
            .with_linkedin(linkedin)
            .with_website(website)
            .with_industry(industry))
    }

    pub async fn view_contacts(&mut self, storage: &dyn ContactStorage) -> io::Result<()> {
        let contacts = storage.load().await;
        if contacts.is_empty() {
            writeln!(self.output, "🧠 No networking history found.")?;
            return Ok(());
        }

        writeln!(self.output, "\n📚 Past Networking Notes ({} contacts):", contacts.len())?;
        for (i, contact) in contacts.iter().enumerate() {
            writeln!(self.output, "\n{}", display::banner(&format!("Contact {}", i + 1)))?;
            writeln!(self.output, "{}", display::contact_details(contact))?;
            if i + 1 < contacts.len() {
                self.prompt("Press Enter to view next contact...")?;
            }
        }
        Ok(())
    }

    pub async fn delete_contact(&mut self, storage: &dyn ContactStorage) -> io::Result<()> {
        let contacts = storage.load().await;
        if contacts.is_empty() {
            writeln!(self.output, "📭 No saved contacts to delete.")?;
            return Ok(());
        }

        writeln!(self.output, "\n🗑️ Select a contact to delete:\n")?;
        for (i, contact) in contacts.iter().enumerate() {
            writeln!(self.output, "{}", display::contact_line(i + 1, contact))?;
        }

        let choice = self.prompt(&format!(
            "\nEnter contact number to delete (1-{}) or 'q' to quit: ",
            contacts.len()
        ))?;
        if choice.eq_ignore_ascii_case("q") {
            writeln!(self.output, "❌ Delete cancelled.")?;
            return Ok(());
        }

        let index = match choice.parse::<usize>() {
            Ok(n) if (1..=contacts.len()).contains(&n) => n - 1,
            Ok(_) => {
                writeln!(self.output, "❌ Please enter a number between 1 and {}.", contacts.len())?;
                return Ok(());
            }
            Err(_) => {
                writeln!(self.output, "❌ Please enter a valid number or 'q' to quit.")?;
                return Ok(());
            }
        };

        let chosen = &contacts[index];
        match storage.delete(&chosen.name, &chosen.company).await {
            Ok(true) => {
                writeln!(
                    self.output,
                    "\n✅ Successfully deleted: {} from {}",
                    chosen.name, chosen.company
                )?;
                writeln!(self.output, "📊 {} contacts remaining", storage.load().await.len())?;
            }
            Ok(false) => writeln!(self.output, "❌ Contact no longer exists.")?,
            Err(e) => writeln!(self.output, "❌ Error saving changes: {}", e)?,
        }
        Ok(())
    }

    pub async fn add_contact(&mut self, manager: &Arc<ResearchManager>) -> io::Result<()> {
        writeln!(self.output, "🚀 Let's research your networking contact!")?;
        let info = self.prompt_contact()?;

        let mut task = manager.spawn(info);
        while let Some(event) = task.events.recv().await {
            if matches!(event, ResearchEvent::Saved(_) | ResearchEvent::SaveFailed(_)) {
                continue;
            }
            writeln!(self.output, "{}", event)?;
        }
        let outcome = task
            .finish()
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        writeln!(self.output, "\n{}", outcome.report())?;
        match &outcome.saved {
            Ok(total) => writeln!(self.output, "{}", ResearchEvent::Saved(*total))?,
            Err(e) => writeln!(self.output, "{}", ResearchEvent::SaveFailed(e.to_string()))?,
        }
        Ok(())
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", display::banner("🔗 NETWORKING ASSISTANT"))?;
        writeln!(self.output, "1. 👥 View past contacts")?;
        writeln!(self.output, "2. 🗑️  Delete a contact")?;
        writeln!(self.output, "3. ➕ Add new contact")?;
        writeln!(self.output, "4. 🚪 Exit")?;
        writeln!(self.output, "{}", "=".repeat(60))
    }

    pub async fn run(&mut self, manager: &Arc<ResearchManager>) -> io::Result<()> {
        writeln!(self.output, "🌟 Welcome to your Personal Networking Assistant!")?;
        writeln!(self.output, "   Research contacts, save notes, and build better connections.")?;

        let result = self.menu_loop(manager).await;
        match result {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {}
            other => other?,
        }
        writeln!(self.output, "\n{}", GOODBYE)
    }

    async fn menu_loop(&mut self, manager: &Arc<ResearchManager>) -> io::Result<()> {
        let storage = Arc::clone(manager.storage());
        loop {
            self.show_menu()?;
            match self.prompt("Enter your choice (1-4): ")?.as_str() {
                "1" => self.view_contacts(storage.as_ref()).await?,
                "2" => self.delete_contact(storage.as_ref()).await?,
                "3" => self.add_contact(manager).await?,
                "4" => return Ok(()),
                _ => {
                    writeln!(self.output, "❌ Invalid choice. Please enter 1, 2, 3, or 4.")?;
                    continue;
                }
            }

            let again = self.prompt("\nWould you like to perform another action? (y/n): ")?;
            if !again.eq_ignore_ascii_case("y") {
                return Ok(());
            }
        }
    }
}
