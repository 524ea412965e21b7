use mockall::mock;
use selsim_core::sim::{CycleRecord, Observer};
use std::sync::{Arc, Mutex};

mock! {
    pub CycleObserver {}
    impl Observer for CycleObserver {
        fn on_cycle(&mut self, record: &CycleRecord);
    }
}

/// Observer that stores every record it sees behind a shared handle.
#[derive(Clone, Default)]
pub struct Recorder {
    pub records: Arc<Mutex<Vec<CycleRecord>>>,
}

impl Observer for Recorder {
    fn on_cycle(&mut self, record: &CycleRecord) {
        self.records.lock().unwrap().push(*record);
    }
}
