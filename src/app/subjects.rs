/// Receives the label of a pressed marker.
pub(in crate::app) trait SubjectHandler {
    fn request_subjects(&mut self, word: &str);
}

/// Default handler: logs each request and keeps a bounded history for the
/// details panel, newest last.
#[derive(Debug, Default)]
pub(in crate::app) struct SubjectLog {
    requests: Vec<String>,
}

impl SubjectLog {
    const HISTORY_LIMIT: usize = 64;

    pub(in crate::app) fn requests(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.requests.iter().map(String::as_str)
    }

    pub(in crate::app) fn len(&self) -> usize {
        self.requests.len()
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(in crate::app) fn clear(&mut self) {
        self.requests.clear();
    }
}

impl SubjectHandler for SubjectLog {
    fn request_subjects(&mut self, word: &str) {
        tracing::info!(word, "subjects requested");
        self.requests.push(word.to_owned());
        if self.requests.len() > Self::HISTORY_LIMIT {
            let overflow = self.requests.len() - Self::HISTORY_LIMIT;
            self.requests.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_requests_in_order() {
        let mut log = SubjectLog::default();
        log.request_subjects("engine");
        log.request_subjects("piston");

        assert_eq!(log.requests().collect::<Vec<_>>(), vec!["engine", "piston"]);
        assert_eq!(log.requests().next_back(), Some("piston"));
    }

    #[test]
    fn history_is_bounded() {
        let mut log = SubjectLog::default();
        for index in 0..100 {
            log.request_subjects(&format!("word-{index}"));
        }

        assert_eq!(log.len(), SubjectLog::HISTORY_LIMIT);
        assert_eq!(log.requests().next(), Some("word-36"));

        log.clear();
        assert!(log.is_empty());
    }
}
