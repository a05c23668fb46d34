//! Починка SGML OFX 1.x («tag soup») в well-formed XML.
//!
//! В SGML-версии листовые элементы не закрываются: `<TRNAMT>-12.50<FITID>1`.
//! Токенизируем тело через quick-xml с выключенной проверкой закрывающих
//! тегов и выдаём поток сбалансированных узлов:
//! - открывающий тег, за которым идёт текст, — лист; закрывается на следующем теге;
//! - закрывающий тег закрывает всё открытое до своей пары;
//! - закрывающий тег без пары отбрасывается;
//! - в конце входа закрывается всё, что осталось открытым.

use crate::{
    error::{OfxError, Result},
    traits::Normalizer,
};
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};
use std::collections::VecDeque;

/// Узел сбалансированного потока.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Open(String),
    Text(String),
    Close(String),
}

/// Нормализатор по умолчанию.
#[derive(Debug, Default, Clone, Copy)]
pub struct SgmlRepair;

impl SgmlRepair {
    pub fn events<'a>(&self, body: &'a str, doc_type: &str) -> Repair<'a> {
        Repair::new(body, doc_type)
    }
}

impl Normalizer for SgmlRepair {
    fn normalize(&self, body: &str, doc_type: &str) -> Result<String> {
        let mut wr = Writer::new(Vec::with_capacity(body.len() + body.len() / 2));

        for m in self.events(body, doc_type) {
            let written = match m? {
                Markup::Open(name) => wr.write_event(Event::Start(BytesStart::new(name))),
                Markup::Text(t) => wr.write_event(Event::Text(BytesText::new(&t))),
                Markup::Close(name) => wr.write_event(Event::End(BytesEnd::new(name))),
            };
            written.map_err(xml)?;
        }

        String::from_utf8(wr.into_inner()).map_err(xml)
    }
}

fn xml<E: std::fmt::Display>(e: E) -> OfxError {
    OfxError::Normalization(e.to_string())
}

/// Итератор узлов; после первой ошибки больше ничего не выдаёт.
pub struct Repair<'a> {
    reader: Reader<&'a [u8]>,
    doc_type: String,
    stack: Vec<String>,
    // у вершины стека уже был текст, т.е. это лист
    leaf: bool,
    seen_root: bool,
    queue: VecDeque<Markup>,
    done: bool,
}

impl<'a> Repair<'a> {
    pub fn new(body: &'a str, doc_type: &str) -> Self {
        let mut reader = Reader::from_str(body);
        reader.trim_text(true);
        reader.check_end_names(false);
        Self {
            reader,
            doc_type: doc_type.to_string(),
            stack: Vec::new(),
            leaf: false,
            seen_root: false,
            queue: VecDeque::new(),
            done: false,
        }
    }

    fn step(&mut self) -> Result<()> {
        let pos = self.reader.buffer_position();
        let event = self
            .reader
            .read_event()
            .map_err(|e| OfxError::Normalization(format!("at byte {pos}: {e}")))?;

        match event {
            Event::Start(e) => {
                let name = tag_name(e.name().as_ref())?;
                self.open(name)?;
            }
            Event::Empty(e) => {
                let name = tag_name(e.name().as_ref())?;
                self.open(name.clone())?;
                self.stack.pop();
                self.queue.push_back(Markup::Close(name));
            }
            Event::Text(t) => {
                let raw = String::from_utf8_lossy(&t).into_owned();
                // `AT&T` и прочие неэкранированные амперсанды оставляем как есть
                let text = t.unescape().map(|c| c.into_owned()).unwrap_or(raw);
                self.text(text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c).trim().to_string();
                self.text(text);
            }
            Event::End(e) => {
                let name = tag_name(e.name().as_ref())?;
                self.close(&name);
            }
            Event::Eof => {
                self.close_leaf();
                while let Some(name) = self.stack.pop() {
                    self.queue.push_back(Markup::Close(name));
                }
                self.done = true;
                if !self.seen_root {
                    return Err(OfxError::Normalization(format!(
                        "no <{}> element found",
                        self.doc_type
                    )));
                }
            }
            // комментарии, декларации, PI, DOCTYPE
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, name: String) -> Result<()> {
        self.close_leaf();
        if self.stack.is_empty() {
            if self.seen_root {
                return Err(OfxError::Normalization(format!(
                    "element <{name}> after the end of <{}>",
                    self.doc_type
                )));
            }
            if !name.eq_ignore_ascii_case(&self.doc_type) {
                return Err(OfxError::Normalization(format!(
                    "expected <{}> root, found <{name}>",
                    self.doc_type
                )));
            }
            self.seen_root = true;
        }
        self.stack.push(name.clone());
        self.queue.push_back(Markup::Open(name));
        Ok(())
    }

    fn text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if self.stack.is_empty() {
            tracing::trace!(text = %text, "text outside of the root element dropped");
            return;
        }
        self.leaf = true;
        self.queue.push_back(Markup::Text(text));
    }

    fn close_leaf(&mut self) {
        if self.leaf {
            self.leaf = false;
            if let Some(name) = self.stack.pop() {
                self.queue.push_back(Markup::Close(name));
            }
        }
    }

    fn close(&mut self, name: &str) {
        if self.leaf {
            let matches = self
                .stack
                .last()
                .is_some_and(|top| top.eq_ignore_ascii_case(name));
            self.close_leaf();
            if matches {
                return;
            }
        }

        match self.stack.iter().rposition(|n| n.eq_ignore_ascii_case(name)) {
            Some(idx) => {
                while self.stack.len() > idx {
                    if let Some(open) = self.stack.pop() {
                        self.queue.push_back(Markup::Close(open));
                    }
                }
            }
            None => tracing::warn!(tag = name, "stray end tag dropped"),
        }
    }
}

impl Iterator for Repair<'_> {
    type Item = Result<Markup>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.queue.pop_front() {
                return Some(Ok(m));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.step() {
                self.done = true;
                self.queue.clear();
                return Some(Err(e));
            }
        }
    }
}

fn tag_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| OfxError::Normalization(format!("tag name: {e}")))
}
