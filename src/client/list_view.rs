use uuid::Uuid;

use super::{LeadClient, Notice, LIST_PAGE_SIZE};
use crate::models::{Lead, LeadStatus};

/// Staff list of leads: the current page, its bounds, and an optional detail view.
///
/// Status changes and deletions patch the loaded page in place instead of refetching it.
#[derive(Debug, Clone)]
pub struct LeadListView {
    page: i64,
    total_pages: i64,
    leads: Vec<Lead>,
    selected: Option<Uuid>,
}

impl Default for LeadListView {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            leads: Vec::new(),
            selected: None,
        }
    }
}

impl LeadListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Fetches the current page. Returns an error notice on failure.
    pub async fn refresh(&mut self, client: &LeadClient) -> Option<Notice> {
        match client.show_leads(self.page, LIST_PAGE_SIZE).await {
            Ok(page) => {
                self.leads = page.leads;
                self.total_pages = page.total_pages.max(1);
                None
            }
            Err(err) => {
                tracing::error!("Error fetching leads: {}", err);
                Some(Notice::Error("Failed to fetch leads".to_string()))
            }
        }
    }

    /// Moves to `page`, clamped to `[1, total_pages]`; refetches only if the page changed.
    pub async fn go_to_page(&mut self, client: &LeadClient, page: i64) -> Option<Notice> {
        let target = page.clamp(1, self.total_pages.max(1));
        if target == self.page {
            return None;
        }
        self.page = target;
        self.refresh(client).await
    }

    pub async fn next_page(&mut self, client: &LeadClient) -> Option<Notice> {
        self.go_to_page(client, self.page.saturating_add(1)).await
    }

    pub async fn prev_page(&mut self, client: &LeadClient) -> Option<Notice> {
        self.go_to_page(client, self.page.saturating_sub(1)).await
    }

    /// Opens the detail view for a lead on the current page.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.leads.iter().any(|l| l.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&Lead> {
        self.selected
            .and_then(|id| self.leads.iter().find(|l| l.id == id))
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Whether the mark-as-Contacted action is enabled for this lead.
    pub fn can_mark_contacted(&self, id: Uuid) -> bool {
        self.leads
            .iter()
            .any(|l| l.id == id && l.status != LeadStatus::Contacted)
    }

    /// Marks a lead Contacted. Returns `None` when the action is disabled.
    pub async fn mark_contacted(&mut self, client: &LeadClient, id: Uuid) -> Option<Notice> {
        if !self.can_mark_contacted(id) {
            return None;
        }

        match client
            .update_status(&id.to_string(), LeadStatus::Contacted)
            .await
        {
            Ok(response) if response.success == 1 => {
                if let Some(lead) = self.leads.iter_mut().find(|l| l.id == id) {
                    lead.status = response.lead.status;
                }
                Some(Notice::Success(response.message))
            }
            Ok(response) => Some(Notice::Error(response.message)),
            Err(err) => {
                tracing::warn!("Error updating status of lead {}: {}", id, err);
                Some(Notice::Error("Error updating status".to_string()))
            }
        }
    }

    /// Deletes a lead and drops it from the loaded page.
    pub async fn delete(&mut self, client: &LeadClient, id: Uuid) -> Notice {
        match client.delete_lead(&id.to_string()).await {
            Ok(response) if response.success == 1 => {
                self.leads.retain(|l| l.id != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                Notice::Success(response.message)
            }
            Ok(response) => Notice::Error(response.message),
            Err(err) => {
                tracing::warn!("Error deleting lead {}: {}", id, err);
                Notice::Error("Error deleting lead".to_string())
            }
        }
    }
}
