//! The top-level parsing state machine.
//!
//! One mutually recursive function per state, each driven by a single peek:
//! `scheme-start` → `scheme` → `path-or-authority` → `authority` →
//! `path-start` → `path` / `path-noscheme` → `query` → `fragment`. The
//! machine validates the input while echoing it into the sink (escape
//! triples verbatim, lax ASCII percent-encoded) and records the component
//! boundaries of the OUTPUT.
//!
//! A mis-recognized scheme backtracks locally: the cursor returns to the
//! start, the sink is cleared, and the input is re-parsed as a relative-path
//! reference.

use crate::error::{ParseError, Result};
use crate::parser::authority;
use crate::parser::bidi;
use crate::parser::chars;
use crate::parser::cursor::Cursor;
use crate::parser::percent;
use crate::parser::sink::Sink;
use crate::types::Positions;

pub(crate) struct IriMachine<'a, O: Sink> {
    input: Cursor<'a>,
    output: &'a mut O,
    positions: Positions,
    unchecked: bool,
    has_authority: bool,
    path_start_slash: bool,
    /// Output offset where the current path segment (or the query or
    /// fragment) begins, for bidi validation
    component_start: usize,
}

impl<'a, O: Sink> IriMachine<'a, O> {
    pub(crate) fn parse(iri: &'a str, unchecked: bool, output: &'a mut O) -> Result<Positions> {
        let mut machine = IriMachine {
            input: Cursor::new(iri),
            output,
            positions: Positions::default(),
            unchecked,
            has_authority: false,
            path_start_slash: false,
            component_start: 0,
        };
        machine.parse_scheme_start()?;
        Ok(machine.positions)
    }

    fn check_bidi(&self) -> bool {
        !self.unchecked && O::BUFFERED
    }

    fn parse_scheme_start(&mut self) -> Result<()> {
        if self.input.as_str().starts_with("//") {
            // Network-path reference: no scheme, straight to the authority
            self.input.skip_bytes(2);
            self.output.push_str("//");
            self.has_authority = true;
            return self.parse_authority();
        }
        match self.input.peek() {
            None => self.parse_relative(),
            Some(':') if !self.unchecked => Err(ParseError::NoScheme),
            Some(':') => self.parse_scheme(),
            Some(c) if chars::is_ascii_letter(c) => self.parse_scheme(),
            Some(_) => self.parse_relative(),
        }
    }

    fn parse_scheme(&mut self) -> Result<()> {
        loop {
            match self.input.next() {
                Some(c) if chars::is_scheme_char(c) => self.output.push(c),
                Some(':') => {
                    self.output.push(':');
                    self.positions.scheme_end = self.output.len();
                    return if self.input.starts_with('/') {
                        self.input.next();
                        self.output.push('/');
                        self.parse_path_or_authority()
                    } else {
                        self.positions.authority_end = self.positions.scheme_end;
                        self.component_start = self.output.len();
                        self.parse_path()
                    };
                }
                _ => {
                    // Not a scheme after all: re-parse as a relative-path
                    // reference
                    self.input.reset();
                    self.output.clear();
                    return self.parse_relative();
                }
            }
        }
    }

    fn parse_path_or_authority(&mut self) -> Result<()> {
        if self.input.starts_with('/') {
            self.input.next();
            self.output.push('/');
            self.has_authority = true;
            self.parse_authority()
        } else {
            // The "/" already written opens the path
            self.positions.authority_end = self.positions.scheme_end;
            self.path_start_slash = true;
            self.component_start = self.output.len();
            self.parse_path()
        }
    }

    fn parse_relative(&mut self) -> Result<()> {
        match self.input.peek() {
            None => {
                self.positions.path_end = self.output.len();
                self.positions.query_end = self.output.len();
                Ok(())
            }
            Some('/') => {
                self.input.next();
                self.output.push('/');
                self.path_start_slash = true;
                self.component_start = self.output.len();
                self.parse_path()
            }
            Some('?') => {
                self.input.next();
                self.positions.path_end = self.output.len();
                self.output.push('?');
                self.parse_query()
            }
            Some('#') => {
                self.input.next();
                self.positions.path_end = self.output.len();
                self.positions.query_end = self.output.len();
                self.output.push('#');
                self.parse_fragment()
            }
            Some(_) => {
                self.component_start = self.output.len();
                self.parse_path_noscheme()
            }
        }
    }

    fn parse_authority(&mut self) -> Result<()> {
        let rest = self.input.as_str();
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let parts = authority::split(&rest[..end]);
        self.input.skip_bytes(end);

        authority::validate_and_emit(&parts, self.output, self.unchecked, self.check_bidi())?;
        self.positions.authority_end = self.output.len();

        let c = self.input.next();
        self.parse_path_start(c)
    }

    fn parse_path_start(&mut self, c: Option<char>) -> Result<()> {
        match c {
            None => {
                self.positions.path_end = self.output.len();
                self.positions.query_end = self.output.len();
                Ok(())
            }
            Some('?') => {
                self.positions.path_end = self.output.len();
                self.output.push('?');
                self.parse_query()
            }
            Some('#') => {
                self.positions.path_end = self.output.len();
                self.positions.query_end = self.output.len();
                self.output.push('#');
                self.parse_fragment()
            }
            Some('/') => {
                self.output.push('/');
                self.component_start = self.output.len();
                self.parse_path()
            }
            Some(c) => {
                self.component_start = self.output.len();
                percent::read_codepoint_or_echar(
                    c,
                    &mut self.input,
                    self.output,
                    chars::is_path_char,
                    self.unchecked,
                )?;
                self.parse_path()
            }
        }
    }

    fn parse_path_noscheme(&mut self) -> Result<()> {
        // The first segment of a relative path must not contain ":", it
        // would be read back as a scheme
        loop {
            match self.input.peek() {
                Some(':') => return Err(ParseError::InvalidFirstSegmentColon),
                None | Some('/') | Some('?') | Some('#') => return self.parse_path(),
                Some(c) => {
                    self.input.next();
                    percent::read_codepoint_or_echar(
                        c,
                        &mut self.input,
                        self.output,
                        chars::is_path_char,
                        self.unchecked,
                    )?;
                }
            }
        }
    }

    fn parse_path(&mut self) -> Result<()> {
        loop {
            match self.input.next() {
                None => {
                    self.validate_segment()?;
                    self.positions.path_end = self.output.len();
                    self.positions.query_end = self.output.len();
                    return Ok(());
                }
                Some('?') => {
                    self.validate_segment()?;
                    self.positions.path_end = self.output.len();
                    self.output.push('?');
                    return self.parse_query();
                }
                Some('#') => {
                    self.validate_segment()?;
                    self.positions.path_end = self.output.len();
                    self.positions.query_end = self.output.len();
                    self.output.push('#');
                    return self.parse_fragment();
                }
                Some('/') => {
                    if !self.has_authority
                        && self.path_start_slash
                        && self.output.len() == self.positions.authority_end + 1
                    {
                        return Err(ParseError::PathStartsWithSlashes);
                    }
                    self.validate_segment()?;
                    self.output.push('/');
                    self.component_start = self.output.len();
                }
                Some(c) => percent::read_codepoint_or_echar(
                    c,
                    &mut self.input,
                    self.output,
                    chars::is_path_char,
                    self.unchecked,
                )?,
            }
        }
    }

    fn parse_query(&mut self) -> Result<()> {
        self.component_start = self.output.len();
        loop {
            match self.input.next() {
                None => {
                    self.validate_segment()?;
                    self.positions.query_end = self.output.len();
                    return Ok(());
                }
                Some('#') => {
                    self.validate_segment()?;
                    self.positions.query_end = self.output.len();
                    self.output.push('#');
                    return self.parse_fragment();
                }
                Some(c) => percent::read_codepoint_or_echar(
                    c,
                    &mut self.input,
                    self.output,
                    chars::is_query_char,
                    self.unchecked,
                )?,
            }
        }
    }

    fn parse_fragment(&mut self) -> Result<()> {
        self.component_start = self.output.len();
        while let Some(c) = self.input.next() {
            percent::read_codepoint_or_echar(
                c,
                &mut self.input,
                self.output,
                chars::is_fragment_char,
                self.unchecked,
            )?;
        }
        self.validate_segment()
    }

    fn validate_segment(&self) -> Result<()> {
        if self.check_bidi() {
            bidi::validate_component(&self.output.as_str()[self.component_start..])?;
        }
        Ok(())
    }
}
