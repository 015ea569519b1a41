//! Consultation comment thread: tree reconstruction, expansion, and
//! optimistic reply/edit reconciliation.
//!
//! DESIGN
//! ======
//! The server sends a flat comment list with parent references. The thread
//! builds the parent -> children adjacency once per load and patches it in
//! place for local replies. Traversal is iterative with a visited set, so
//! malformed data (missing parents, cycles) still renders every comment
//! exactly once: comments whose parent is unknown, and the first member of
//! any unreachable cycle, are promoted to top level.
//!
//! Local mutations are explicit: an entry is `Pending` from submit until the
//! server answers, then either confirmed or rolled back.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use std::collections::{HashMap, HashSet};

use crate::net::api::ApiError;
use crate::net::types::{Comment, Consultation, Doctor, RootComment};

/// Prefix of locally generated ids for replies not yet stored server-side.
pub const TEMP_ID_PREFIX: &str = "pending-";

/// Label shown next to comments written by the consultation's author.
pub const AUTHOR_LABEL: &str = "автор";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Confirmed,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct EditRollback {
    content: String,
    modified_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentEntry {
    pub comment: Comment,
    pub sync: SyncState,
    rollback: Option<EditRollback>,
}

impl CommentEntry {
    fn confirmed(comment: Comment) -> Self {
        Self { comment, sync: SyncState::Confirmed, rollback: None }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.sync == SyncState::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThreadError {
    #[error("Комментарий не может быть пустым")]
    EmptyContent,
    #[error("Комментарий не найден")]
    UnknownComment(String),
    #[error("Ответ уже отправляется")]
    ReplyInFlight,
    #[error("Нельзя ответить на несохранённый комментарий")]
    ParentNotSaved,
    #[error("Изменение уже сохраняется")]
    EditInFlight,
    #[error("Изменять комментарий может только его автор")]
    NotAuthor,
}

/// One visible line of the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Per-comment expand flags. Absent means collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedComments {
    open: HashSet<String>,
}

impl ExpandedComments {
    pub fn toggle(&mut self, id: &str) {
        if !self.open.remove(id) {
            self.open.insert(id.to_owned());
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.open.contains(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentThread {
    pub consultation_id: String,
    pub speciality: String,
    root_author: String,
    order: Vec<String>,
    entries: HashMap<String, CommentEntry>,
    children: HashMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl CommentThread {
    /// Build the thread for a consultation.
    ///
    /// `root` is the root comment embedded in the inspection; it is added to
    /// the list if the consultation detail omits it.
    #[must_use]
    pub fn new(consultation: &Consultation, root: Option<&RootComment>) -> Self {
        let mut comments: Vec<Comment> = Vec::with_capacity(consultation.comments.len() + 1);
        if let Some(root) = root {
            if !consultation.comments.iter().any(|c| c.id == root.id) {
                comments.push(Comment {
                    id: root.id.clone(),
                    create_time: root.create_time.clone(),
                    modified_date: root.modify_time.clone(),
                    content: root.content.clone(),
                    author_id: root.author.id.clone(),
                    author: root.author.name.clone(),
                    parent_id: None,
                });
            }
        }
        comments.extend(consultation.comments.iter().cloned());

        let root_author = root.map(|r| r.author.name.clone()).unwrap_or_else(|| {
            comments
                .iter()
                .find(|c| c.parent_id.is_none())
                .map(|c| c.author.clone())
                .unwrap_or_default()
        });

        let mut order = Vec::with_capacity(comments.len());
        let mut entries = HashMap::with_capacity(comments.len());
        for comment in comments {
            if entries.contains_key(&comment.id) {
                continue;
            }
            order.push(comment.id.clone());
            entries.insert(comment.id.clone(), CommentEntry::confirmed(comment));
        }

        let mut thread = Self {
            consultation_id: consultation.id.clone(),
            speciality: consultation.speciality.name.clone(),
            root_author,
            order,
            entries,
            children: HashMap::new(),
            roots: Vec::new(),
        };
        thread.link(root.map(|r| r.id.as_str()));
        thread
    }

    fn link(&mut self, root_id: Option<&str>) {
        let mut roots = Vec::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for id in &self.order {
            let parent = self.entries.get(id).and_then(|e| e.comment.parent_id.as_deref());
            match parent {
                Some(parent) if parent != id && self.entries.contains_key(parent) => {
                    children.entry(parent.to_owned()).or_default().push(id.clone());
                }
                _ => roots.push(id.clone()),
            }
        }
        if let Some(root_id) = root_id {
            if let Some(pos) = roots.iter().position(|id| id == root_id) {
                let id = roots.remove(pos);
                roots.insert(0, id);
            }
        }

        let mut reached = HashSet::new();
        let mut stack: Vec<&str> = roots.iter().map(String::as_str).collect();
        while let Some(id) = stack.pop() {
            if reached.insert(id.to_owned()) {
                stack.extend(children.get(id).into_iter().flatten().map(String::as_str));
            }
        }

        // Cycle members never reach a root; promote one per cycle.
        for id in &self.order {
            if reached.contains(id) {
                continue;
            }
            for list in children.values_mut() {
                list.retain(|child| child != id);
            }
            roots.push(id.clone());
            let mut stack = vec![id.clone()];
            while let Some(next) = stack.pop() {
                if reached.insert(next.clone()) {
                    stack.extend(children.get(&next).into_iter().flatten().cloned());
                }
            }
        }

        self.children = children;
        self.roots = roots;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Comment ids in server order (local replies appended).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CommentEntry> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// Rows to render: every top-level comment, plus children of expanded
    /// comments, depth-first in server order.
    #[must_use]
    pub fn visible_rows(&self, expanded: &ExpandedComments) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<(&str, usize)> = self.roots.iter().rev().map(|id| (id.as_str(), 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let kids = self.children_of(id);
            let has_children = !kids.is_empty();
            let is_open = has_children && expanded.is_expanded(id);
            rows.push(TreeRow { id: id.to_owned(), depth, has_children, expanded: is_open });
            if is_open {
                stack.extend(kids.iter().rev().map(|child| (child.as_str(), depth + 1)));
            }
        }
        rows
    }

    /// `автор` for the root comment and for replies by the root's author
    /// (matched by display name), otherwise the consultation speciality.
    #[must_use]
    pub fn author_label(&self, id: &str) -> &str {
        match self.entries.get(id) {
            Some(entry) if entry.comment.parent_id.is_none() || entry.comment.author == self.root_author => {
                AUTHOR_LABEL
            }
            _ => self.speciality.as_str(),
        }
    }

    #[must_use]
    pub fn can_edit(&self, id: &str, user_id: Option<&str>) -> bool {
        match (self.entries.get(id), user_id) {
            (Some(entry), Some(user)) => !entry.is_pending() && !user.is_empty() && entry.comment.author_id == user,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_modified(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|e| e.comment.is_modified())
    }

    // =========================================================================
    // REPLIES
    // =========================================================================

    /// Insert a pending reply under `parent_id` and return its temporary id.
    ///
    /// # Errors
    ///
    /// Rejects empty content, unknown or unsaved parents, and a second reply
    /// to the same parent while the first is in flight.
    pub fn begin_reply(&mut self, parent_id: &str, content: &str, author: &Doctor, now: &str) -> Result<String, ThreadError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ThreadError::EmptyContent);
        }
        let parent = self
            .entries
            .get(parent_id)
            .ok_or_else(|| ThreadError::UnknownComment(parent_id.to_owned()))?;
        if parent.is_pending() && parent.comment.id.starts_with(TEMP_ID_PREFIX) {
            return Err(ThreadError::ParentNotSaved);
        }
        let in_flight = self.children_of(parent_id).iter().any(|child| {
            self.entries
                .get(child)
                .is_some_and(|e| e.is_pending() && child.starts_with(TEMP_ID_PREFIX))
        });
        if in_flight {
            return Err(ThreadError::ReplyInFlight);
        }

        let temp_id = format!("{TEMP_ID_PREFIX}{}", uuid::Uuid::new_v4());
        let comment = Comment {
            id: temp_id.clone(),
            create_time: now.to_owned(),
            modified_date: None,
            content: content.to_owned(),
            author_id: author.id.clone(),
            author: author.name.clone(),
            parent_id: Some(parent_id.to_owned()),
        };
        self.entries.insert(
            temp_id.clone(),
            CommentEntry { comment, sync: SyncState::Pending, rollback: None },
        );
        self.order.push(temp_id.clone());
        self.children.entry(parent_id.to_owned()).or_default().push(temp_id.clone());
        Ok(temp_id)
    }

    /// Re-key a pending reply to its server id and mark it confirmed.
    ///
    /// # Errors
    ///
    /// [`ThreadError::UnknownComment`] if `temp_id` is not a pending reply.
    pub fn confirm_reply(&mut self, temp_id: &str, server_id: &str) -> Result<(), ThreadError> {
        let mut entry = self
            .entries
            .remove(temp_id)
            .ok_or_else(|| ThreadError::UnknownComment(temp_id.to_owned()))?;
        entry.comment.id = server_id.to_owned();
        entry.sync = SyncState::Confirmed;
        let parent = entry.comment.parent_id.clone();
        self.entries.insert(server_id.to_owned(), entry);

        for id in &mut self.order {
            if id == temp_id {
                server_id.clone_into(id);
            }
        }
        if let Some(list) = parent.and_then(|p| self.children.get_mut(&p)) {
            for id in list.iter_mut() {
                if id == temp_id {
                    server_id.clone_into(id);
                }
            }
        }
        Ok(())
    }

    /// Drop a pending reply after the server rejected it.
    pub fn rollback_reply(&mut self, temp_id: &str) {
        let Some(entry) = self.entries.remove(temp_id) else {
            return;
        };
        self.order.retain(|id| id != temp_id);
        if let Some(parent) = entry.comment.parent_id {
            if let Some(list) = self.children.get_mut(&parent) {
                list.retain(|id| id != temp_id);
                if list.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
    }

    /// Localized message for a rejected reply.
    #[must_use]
    pub fn reply_failure_message(&self, err: &ApiError) -> String {
        match err {
            ApiError::Forbidden => format!("Только {} может писать комментарии", self.speciality),
            _ => "Не удалось отправить ответ".to_owned(),
        }
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    /// Apply an edit locally and mark it pending.
    ///
    /// # Errors
    ///
    /// Rejects empty content, unknown comments, non-authors, and a second
    /// edit while one is in flight.
    pub fn begin_edit(&mut self, id: &str, content: &str, user_id: Option<&str>, now: &str) -> Result<(), ThreadError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ThreadError::EmptyContent);
        }
        if !self.entries.contains_key(id) {
            return Err(ThreadError::UnknownComment(id.to_owned()));
        }
        if self.entries.get(id).is_some_and(CommentEntry::is_pending) {
            return Err(ThreadError::EditInFlight);
        }
        if !self.can_edit(id, user_id) {
            return Err(ThreadError::NotAuthor);
        }
        let Some(entry) = self.entries.get_mut(id) else {
            return Err(ThreadError::UnknownComment(id.to_owned()));
        };
        entry.rollback = Some(EditRollback {
            content: std::mem::replace(&mut entry.comment.content, content.to_owned()),
            modified_date: entry.comment.modified_date.replace(now.to_owned()),
        });
        entry.sync = SyncState::Pending;
        Ok(())
    }

    pub fn confirm_edit(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.sync = SyncState::Confirmed;
            entry.rollback = None;
        }
    }

    /// Restore the content and timestamp captured by [`Self::begin_edit`].
    pub fn rollback_edit(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            if let Some(previous) = entry.rollback.take() {
                entry.comment.content = previous.content;
                entry.comment.modified_date = previous.modified_date;
            }
            entry.sync = SyncState::Confirmed;
        }
    }
}
