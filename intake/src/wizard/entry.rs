// Entry URL handling
// `token` = fresh invite, `edit` = resume a saved draft. Both are stripped from the URL shown afterwards.

use url::Url;

const INVITE_PARAM: &str = "token";
const RESUME_PARAM: &str = "edit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryToken {
    Invite(String),
    Resume(String),
}

impl EntryToken {
    pub fn value(&self) -> &str {
        match self {
            EntryToken::Invite(t) | EntryToken::Resume(t) => t,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryParams {
    pub token: Option<EntryToken>,
    /// Entry URL with the token parameters removed.
    pub visible_url: Option<String>,
}

/// Parse the entry URL. `edit` wins when both parameters are present; blank values count as absent.
pub fn parse_entry_url(raw: &str) -> Result<EntryParams, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;

    let mut invite = None;
    let mut resume = None;
    let mut kept: Vec<(String, String)> = Vec::new();
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            INVITE_PARAM => {
                if invite.is_none() && !v.trim().is_empty() {
                    invite = Some(v.trim().to_string());
                }
            }
            RESUME_PARAM => {
                if resume.is_none() && !v.trim().is_empty() {
                    resume = Some(v.trim().to_string());
                }
            }
            _ => kept.push((k.into_owned(), v.into_owned())),
        }
    }

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    let token = match (resume, invite) {
        (Some(r), _) => Some(EntryToken::Resume(r)),
        (None, Some(i)) => Some(EntryToken::Invite(i)),
        (None, None) => None,
    };

    Ok(EntryParams {
        token,
        visible_url: Some(url.to_string()),
    })
}
