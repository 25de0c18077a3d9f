use crate::model::Decision;

/// Map an Azure DevOps vote code to a report decision. Only 10 (approved),
/// 5 (approved with suggestions), and -10 (rejected) count; -5 (waiting for
/// author) and 0 (no vote) carry no decision, as does any unknown code.
pub fn classify_vote(vote: i32) -> Option<Decision> {
  match vote {
    10 | 5 => Some(Decision::Approved),
    -10 => Some(Decision::Rejected),
    _ => None,
  }
}
