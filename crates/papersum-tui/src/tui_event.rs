use papersum_core::{
    AnalysisResult, AnalysisTicket, ApiError, FileCandidate, IngestError, Paper, SearchTicket,
};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Run a paper search.
    Search(SearchTicket),
    /// Send the analysis buffer to the backend.
    Analyze(AnalysisTicket),
    /// Read a picked file that already passed the type gate.
    ReadFile(FileCandidate),
}

/// Events flowing from the backend task to the TUI. Exactly one per command.
#[derive(Debug)]
pub enum BackendEvent {
    SearchFinished {
        id: u64,
        result: Result<Vec<Paper>, ApiError>,
    },
    AnalysisFinished {
        id: u64,
        result: Result<AnalysisResult, ApiError>,
    },
    FileRead {
        name: String,
        result: Result<String, IngestError>,
    },
}
