pub mod catalog;
pub mod proctoring;
pub mod question;
pub mod session;
pub mod timer;
pub mod user;

pub use catalog::{ActionResult, CreateTestRequest, Test, TestCategory, TestSummary};
pub use proctoring::{ProctorSignal, ProctorSignalRequest, Violation};
pub use question::{OptionLabel, Question, ShuffledOption, ShuffledQuestion};
pub use session::{
    AnswerRequest, ConfirmSubmitRequest, ConfirmSubmitResponse, ExamPhase, NavigateRequest,
    QuestionView, ScoreBreakdown, SelectTestRequest, Session, SessionOverview, StatusCounts,
    SubmitPrompt,
};
pub use user::{Account, AccountProfile, AddStudentRequest, LoginRequest, LoginResponse, Role};
