use crate::DisplayError;
use derive_more::Display;
use itertools::Itertools;
use std::fmt;
use std::iter;
use std::str::FromStr;

/// Subset of `0..Combination::CAPACITY` stored as a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Combination(u64);

impl Combination {
    pub const CAPACITY: usize = 64;

    pub fn empty() -> Combination {
        Combination(0)
    }

    pub fn contains(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1 << index) != 0
    }

    pub fn with(self, index: usize) -> Combination {
        debug_assert!(index < Self::CAPACITY);
        Combination(self.0 | 1 << index)
    }

    pub fn without(self, index: usize) -> Combination {
        Combination(self.0 & !(1 << index))
    }

    /// Highest index in the combination.
    pub fn last(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(Self::CAPACITY - 1 - self.0.leading_zeros() as usize)
        }
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Indexes in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..Self::CAPACITY).filter(move |&index| self.contains(index))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CombinationsError {
    #[display(fmt = "The number of elements should be bigger than 0.")]
    EmptyDomain,
    #[display(fmt = "The number of elements {} exceeds the combination capacity of 64.", _0)]
    DomainTooLarge(usize),
}

impl std::error::Error for CombinationsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    Recursive,
    Iterative,
}

impl Default for Generation {
    fn default() -> Self {
        Generation::Iterative
    }
}

impl FromStr for Generation {
    type Err = DisplayError;
    fn from_str(name: &str) -> Result<Generation, DisplayError> {
        match name {
            "recursive" => Ok(Generation::Recursive),
            "iterative" => Ok(Generation::Iterative),
            _ => Err(format!(
                "Generation {:?} not found, following are valid: recursive, iterative.",
                name
            )
            .into()),
        }
    }
}

/// Lazily enumerates the combinations of `0..len` that `can_extend` lets grow.
///
/// `can_extend(partial, i)` is asked, for ascending `i`, whether `i` may join
/// `partial`, which only holds indexes below `i`. A refusal still emits the
/// partial combination, later indexes may extend it. The empty combination
/// comes first and every combination is emitted exactly once, whichever
/// `Generation` is used.
#[derive(Clone)]
pub struct CombinationsStream<P> {
    len: usize,
    can_extend: P,
    generation: Generation,
}

impl<P> fmt::Debug for CombinationsStream<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinationsStream")
            .field("len", &self.len)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<P> CombinationsStream<P>
where
    P: Fn(Combination, usize) -> bool,
{
    pub fn new(len: usize, can_extend: P) -> Result<CombinationsStream<P>, CombinationsError> {
        match len {
            0 => Err(CombinationsError::EmptyDomain),
            len if len > Combination::CAPACITY => Err(CombinationsError::DomainTooLarge(len)),
            len => Ok(CombinationsStream {
                len,
                can_extend,
                generation: Generation::default(),
            }),
        }
    }

    pub fn with_generation(self, generation: Generation) -> CombinationsStream<P> {
        CombinationsStream { generation, ..self }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Combination> + '_> {
        match self.generation {
            Generation::Recursive => self.recursive(0, Combination::empty()),
            Generation::Iterative => Box::new(IterativeCombinations {
                stream: self,
                current: Combination::empty(),
                cursor: 0,
                started: false,
            }),
        }
    }

    // Only the leftmost spine is built eagerly, the branch through `start`
    // is deferred until the branch without it is exhausted.
    fn recursive(
        &self,
        start: usize,
        partial: Combination,
    ) -> Box<dyn Iterator<Item = Combination> + '_> {
        if start >= self.len {
            return Box::new(iter::once(partial));
        }
        let extended = iter::once(start)
            .filter(move |&index| (self.can_extend)(partial, index))
            .flat_map(move |index| self.recursive(index + 1, partial.with(index)));
        Box::new(self.recursive(start + 1, partial).chain(extended))
    }
}

/// Depth first walk with an explicit cursor, no recursion.
struct IterativeCombinations<'a, P> {
    stream: &'a CombinationsStream<P>,
    current: Combination,
    // next candidate index for `current`
    cursor: usize,
    started: bool,
}

impl<'a, P> Iterator for IterativeCombinations<'a, P>
where
    P: Fn(Combination, usize) -> bool,
{
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        if !self.started {
            self.started = true;
            return Some(self.current);
        }
        let len = self.stream.len;
        loop {
            if self.cursor < len {
                let candidate = self.cursor;
                self.cursor += 1;
                if (self.stream.can_extend)(self.current, candidate) {
                    self.current = self.current.with(candidate);
                    return Some(self.current);
                }
            } else {
                // drop indexes from the top until one has a successor left
                loop {
                    let last = self.current.last()?;
                    self.current = self.current.without(last);
                    self.cursor = last + 1;
                    if self.cursor < len {
                        break;
                    }
                }
            }
        }
    }
}
