//! The banner prepended to generated fragments on request.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// GPL-3 notice emitted verbatim ahead of the fragment when
/// [`Config::license`](crate::Config) is set.
pub const BANNER: &str = "\
/* This file was machine generated.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
";
