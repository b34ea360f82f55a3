#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub commands_sent: u64,
    pub commands_received: u64,
}

impl NetworkStats {
    pub fn record_sent(&mut self, bytes: usize) {
        self.bytes_sent += bytes as u64;
    }

    pub fn record_received(&mut self, bytes: usize) {
        self.bytes_received += bytes as u64;
    }

    pub fn record_command_sent(&mut self) {
        self.commands_sent += 1;
        self.record_sent(1);
    }

    pub fn record_command_received(&mut self) {
        self.commands_received += 1;
        self.record_received(1);
    }
}
