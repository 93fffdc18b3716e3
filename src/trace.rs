//! Trace data model (spec §3.1): a finite ordered sequence of fixed-width
//! bit-vector states, plus the half-open trace window used by the evaluator.

const WORD_BITS: usize = 64;

/// A single state: a fixed-width bit vector indexed by propositional
/// variable id `p0, p1, ...`.
///
/// Packed into `u64` words rather than kept as a `String` of `'0'`/`'1'`
/// characters — the evaluator only ever asks "is bit `id` set", and a packed
/// representation avoids a byte-index bounds check turning into a panic path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    words: Vec<u64>,
    width: usize,
}

impl State {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Value of bit `id`. Out-of-range ids are `false`, matching spec §4.1.1's
    /// treatment of out-of-range variable ids (enforced by the caller too,
    /// but `State` itself stays total).
    pub fn get(&self, id: usize) -> bool {
        if id >= self.width {
            return false;
        }
        let word = id / WORD_BITS;
        let bit = id % WORD_BITS;
        (self.words[word] >> bit) & 1 == 1
    }

    /// Parse a state from a line of characters; any character other than
    /// `'0'`/`'1'` is dropped (spec §6.1, tolerates comma separators).
    pub fn from_line(line: &str) -> State {
        let bits: Vec<bool> = line
            .chars()
            .filter_map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect();
        State::from_bits(&bits)
    }

    pub fn from_bits(bits: &[bool]) -> State {
        let width = bits.len();
        let mut words = vec![0u64; width.div_ceil(WORD_BITS).max(1)];
        for (id, &bit) in bits.iter().enumerate() {
            if bit {
                words[id / WORD_BITS] |= 1u64 << (id % WORD_BITS);
            }
        }
        State { words, width }
    }
}

/// A finite ordered sequence of states. States within one trace share a
/// width (`num_vars_in_trace`); traces in a dataset may have differing
/// lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    states: Vec<State>,
}

impl Trace {
    pub fn new(states: Vec<State>) -> Trace {
        Trace { states }
    }

    /// Convenience constructor from `"0"`/`"1"` strings, used pervasively by
    /// tests and the regression harness.
    pub fn from_strs<I, S>(lines: I) -> Trace
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Trace::new(lines.into_iter().map(|l| State::from_line(l.as_ref())).collect())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, index: usize) -> &State {
        &self.states[index]
    }

    /// Width of the trace's states, or 0 for a length-0 trace.
    pub fn num_vars(&self) -> usize {
        self.states.first().map_or(0, State::width)
    }

    pub fn window(&self) -> TraceWindow<'_> {
        TraceWindow {
            trace: self,
            begin: 0,
            end: self.len(),
        }
    }
}

/// A half-open range `[begin, end)` within a trace, used by the recursive
/// evaluator so it never has to materialize a sub-trace (spec §4.1.2).
#[derive(Clone, Copy, Debug)]
pub struct TraceWindow<'a> {
    trace: &'a Trace,
    begin: usize,
    end: usize,
}

impl<'a> TraceWindow<'a> {
    pub fn new(trace: &'a Trace, begin: usize, end: usize) -> TraceWindow<'a> {
        TraceWindow { trace, begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// State at absolute trace index `begin + offset`.
    pub fn state_at(&self, offset: usize) -> &'a State {
        self.trace.state(self.begin + offset)
    }

    pub fn first_state(&self) -> Option<&'a State> {
        (!self.is_empty()).then(|| self.state_at(0))
    }

    /// Window starting `offset` states later, open at the same end.
    pub fn suffix(&self, offset: usize) -> TraceWindow<'a> {
        TraceWindow {
            trace: self.trace,
            begin: self.begin + offset,
            end: self.end,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_ignores_non_bit_chars() {
        let s = State::from_line("1,0,1,1");
        assert_eq!(s.width(), 4);
        assert!(s.get(0));
        assert!(!s.get(1));
        assert!(s.get(2));
        assert!(s.get(3));
    }

    #[test]
    fn out_of_range_id_is_false() {
        let s = State::from_line("10");
        assert!(!s.get(99));
    }

    #[test]
    fn window_suffix_advances_begin_only() {
        let trace = Trace::from_strs(["00", "01", "10", "11"]);
        let w = trace.window().suffix(2);
        assert_eq!(w.begin(), 2);
        assert_eq!(w.end(), 4);
        assert_eq!(w.len(), 2);
        assert!(w.state_at(0).get(0));
    }
}
