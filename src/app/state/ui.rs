use crate::lookup::LookupStatus;

/// Manual entry form of the wordbook panel.
#[derive(Debug, Default)]
pub(in crate::app) struct WordbookForm {
    pub(in crate::app) source: String,
    pub(in crate::app) translation: String,
    pub(in crate::app) notice: Option<String>,
}

#[derive(Debug, Default)]
pub(in crate::app) struct LookupPanel {
    pub(in crate::app) query: String,
    pub(in crate::app) status: LookupStatus,
    pub(in crate::app) next_request_id: u64,
}

impl LookupPanel {
    pub(in crate::app) fn begin_request(&mut self, word: &str) -> u64 {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request_id = self.next_request_id;
        self.status = LookupStatus::Pending {
            request_id,
            word: word.to_string(),
        };
        request_id
    }
}
