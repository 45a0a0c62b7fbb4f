/// History indices at which the reproduction number was changed from the
/// outside. Written by scenario drivers and read back by report renderers;
/// the model itself never consults them.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    lockdowns: Vec<usize>,
    openups: Vec<usize>,
}

impl EventLog {
    pub fn lockdowns(&self) -> &[usize] {
        &self.lockdowns
    }

    pub fn openups(&self) -> &[usize] {
        &self.openups
    }

    pub(crate) fn record_lockdown(&mut self, day_index: usize) {
        self.lockdowns.push(day_index);
    }

    pub(crate) fn record_openup(&mut self, day_index: usize) {
        self.openups.push(day_index);
    }
}
