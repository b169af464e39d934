mod meetings;

pub use meetings::MeetingRepo;
