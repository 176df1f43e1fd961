// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Template fragments for the generated interceptor sources.
//!
//! The text here is the whole contract: the definitions artifact carries
//! inline-assembly accessor bodies, the redirector artifact carries MASM
//! declarations and stubs, and the five Asan* macros hold the code paths
//! shared between accessor variants. Doubled braces are literal braces.

use crate::core::formatter::MacroRegistry;

/// Shared file header. `{c}` is the comment marker for the target file kind.
pub const HEADER: &str = r#"{c} Copyright 2015 Google Inc. All Rights Reserved.
{c}
{c} Licensed under the Apache License, Version 2.0 (the "License");
{c} you may not use this file except in compliance with the License.
{c} You may obtain a copy of the License at
{c}
{c}     http://www.apache.org/licenses/LICENSE-2.0
{c}
{c} Unless required by applicable law or agreed to in writing, software
{c} distributed under the License is distributed on an "AS IS" BASIS,
{c} WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
{c} See the License for the specific language governing permissions and
{c} limitations under the License.

{c} This file is generated by hookForge, DO NOT MODIFY.
"#;

pub const ASM_HEADER: &str = r#".386
.MODEL FLAT, C

.CODE

; Declare the tail function all the stubs direct to.
EXTERN C asan_redirect_tail:PROC
"#;

pub const PROC_HEADER: &str = r#"
; Declare a single top-level function to prevent identical code folding from
; folding the redirectors into one. Each redirector simply calls through to
; the tail function. This allows the tail function to trivially compute the
; redirector's address, which is used to identify the invoked redirector.
asan_redirectors PROC
"#;

pub const PROC_TRAILER: &str = r#"asan_redirectors ENDP

END
"#;

/// The single-instance routines emitted once at the top of the definitions
/// artifact: the two no-check passthroughs and the shared tail routine every
/// redirector funnels into.
pub const GLOBAL_FUNCTIONS: &str = r#"// On entry, the address to check is in EDX and the previous contents of
// EDX are on stack. On exit the previous contents of EDX have been restored
// and popped off the stack. This function modifies no other registers,
// in particular it saves and restores EFLAGS.
extern "C" __declspec(naked)
void asan_no_check() {{
  __asm {{
    // Restore EDX.
    mov edx, DWORD PTR[esp + 4]
    // And return.
    ret 4
  }}
}}

// No state is saved for string instructions.
extern "C" __declspec(naked)
void asan_string_no_check() {{
  __asm {{
    // Just return.
    ret
  }}
}}

// On entry, the address to check is in EDX and the stack has:
// - previous contents of EDX.
// - return address to original caller.
// - return address to redirection stub.
extern "C" __declspec(naked)
void asan_redirect_tail() {{
  __asm {{
    // Prologue, save context.
    pushfd
    pushad
    // Compute the address of the calling function and push it.
    mov eax, DWORD PTR[esp + 9 * 4]
    sub eax, 5  // Length of call instruction.
    push eax
    // Push the original caller's address.
    push DWORD PTR[esp + 11 * 4]
    call agent::asan::RedirectStubEntry
    // Clean arguments off the stack.
    add esp, 8

    // Overwrite access_size with the stub to return to.
    mov DWORD PTR[esp + 9 * 4], eax

    // Restore context.
    popad
    popfd

    // return to the stashed stub.
    ret
  }}
}}
"#;

// Saves EAX onto the stack and loads the low flags byte into it.
//
// LAHF/SAHF is markedly cheaper than PUSHFD/POPFD for saving the arithmetic
// flags, and the overflow flag is carried separately through AL via SETO.
const SAVE_EFLAGS: &str = r#"    // Save the EFLAGS.
    push eax
    lahf
    seto al"#;

// Restores the flags saved by SAVE_EFLAGS.
//
// The flags value is assumed to be in EAX and the previous value of EAX on
// the top of the stack. Adding 0x7f to AL restores the overflow flag.
const RESTORE_EFLAGS: &str = r#"    // Restore the EFLAGS.
    add al, 0x7f
    sahf
    pop eax"#;

// The fast path shared between the accessor variants. Saves the memory
// location for the slow path, treats signed addresses as wild accesses, and
// falls through when the shadow byte for the location is zero.
const FAST_PATH: &str = r#"    push edx
    sar edx, 3
    js report_failure
    movzx edx, BYTE PTR[edx + {shadow}]
    cmp dl, 0
    jnz check_access_slow
    add esp, 4"#;

// The slow path shared between the accessor variants. Expects the memory
// location on top of the stack and its shadow byte in DL, and relies on the
// preceding "cmp dl, 0" having set the sign flag for non-accessible bytes.
const SLOW_PATH: &str = r#"    js report_failure
    mov dh, BYTE PTR[esp]
    and dh, 7
    cmp dh, dl
    jae report_failure
    add esp, 4"#;

// The error path. Expects the previous value of EDX at [ESP + 4] and the
// faulty address at [ESP]; builds a register context and reports.
const ERROR_PATH: &str = r#"    // Restore original value of EDX, and put memory location on stack.
    xchg edx, DWORD PTR[esp + 4]
    // Create an Asan registers context on the stack.
    pushfd
    pushad
    // Fix the original value of ESP in the Asan registers context.
    // Removing 12 bytes (e.g. EFLAGS / EIP / Original EDX).
    add DWORD PTR[esp + 12], 12
    // Push ARG4: the address of Asan context on stack.
    push esp
    // Push ARG3: the access size.
    push {access_size}
    // Push ARG2: the access type.
    push {access_mode_value}
    // Push ARG1: the memory location.
    push DWORD PTR[esp + 52]
    call agent::asan::ReportBadMemoryAccess
    // Remove 4 x ARG on stack.
    add esp, 16
    // Restore original registers.
    popad
    popfd
    // Return and remove memory location on stack.
    ret 4"#;

/// Accessor definition for one (width, direction) pair. Symbol:
/// `asan_check_{access_size}_byte_{access_mode_str}`.
pub const CHECK_FUNCTION: &str = r#"// On entry, the address to check is in EDX and the previous contents of
// EDX are on stack. On exit the previous contents of EDX have been restored
// and popped off the stack. This function modifies no other registers,
// in particular it saves and restores EFLAGS.
extern "C" __declspec(naked)
void asan_check_{access_size}_byte_{access_mode_str}() {{
  __asm {{
    {AsanSaveEflags}
    {AsanFastPath}
    // Restore original EDX.
    mov edx, DWORD PTR[esp + 8]
    {AsanRestoreEflags}
    ret 4
  check_access_slow:
    {AsanSlowPath}
    // Restore original EDX.
    mov edx, DWORD PTR[esp + 8]
    {AsanRestoreEflags}
    ret 4
  report_failure:
    // Restore memory location in EDX.
    pop edx
    {AsanRestoreEflags}
    {AsanErrorPath}
  }}
}}
"#;

/// Flag-clobbering accessor variant. Symbol:
/// `asan_check_{access_size}_byte_{access_mode_str}_no_flags`. Calling the
/// generated routine may alter EFLAGS.
pub const CHECK_FUNCTION_NO_FLAGS: &str = r#"// On entry, the address to check is in EDX and the previous contents of
// EDX are on stack. On exit the previous contents of EDX have been restored
// and popped off the stack. This function may modify EFLAGS, but preserves
// all other registers.
extern "C" __declspec(naked)
void asan_check_{access_size}_byte_{access_mode_str}_no_flags() {{
  __asm {{
    {AsanFastPath}
    // Restore original EDX.
    mov edx, DWORD PTR[esp + 4]
    ret 4
  check_access_slow:
    {AsanSlowPath}
    // Restore original EDX.
    mov edx, DWORD PTR[esp + 4]
    ret 4
  report_failure:
    // Restore memory location in EDX.
    pop edx
    {AsanErrorPath}
  }}
}}
"#;

/// Redirector stub for one scalar accessor.
pub const REDIRECT_FUNCTION: &str = r#"asan_redirect_{access_size}_byte_{access_mode_str}{suffix} LABEL PROC
  call asan_redirect_tail"#;

/// Public declaration for one scalar redirector label.
pub const REDIRECT_FUNCTION_DECL: &str =
    r#"PUBLIC asan_redirect_{access_size}_byte_{access_mode_str}{suffix}"#;

/// Accessor definition for one string-operation entry. Symbol:
/// `asan_check{prefix}{access_size}_byte_{func}_access`.
pub const CHECK_STRINGS: &str = r#"extern "C" __declspec(naked)
void asan_check{prefix}{access_size}_byte_{func}_access() {{
  __asm {{
    // Prologue, save context.
    pushfd
    pushad
    // Fix the original value of ESP in the Asan registers context.
    // Removing 8 bytes (e.g.EFLAGS / EIP was on stack).
    add DWORD PTR[esp + 12], 8
    // Setup increment in EBX (depends on direction flag in EFLAGS).
    mov ebx, {access_size}
    pushfd
    pop eax
    test eax, 0x400
    jz skip_neg_direction
    neg ebx
  skip_neg_direction:
    // By standard calling convention, direction flag must be forward.
    cld
    // Push ARG(context), the Asan registers context.
    push esp
    // Push ARG(compare), shortcut when memory contents differ.
    push {compare}
    // Push ARG(increment), increment for EDI/EDI.
    push ebx
    // Push ARG(access_size), the access size.
    push {access_size}
    // Push ARG(length), the number of memory accesses.
    push {counter}
    // Push ARG(src_access_mode), source access type.
    push {src_mode}
    // Push ARG(src), the source pointer.
    push esi
    // Push ARG(dst_access_mode), destination access type.
    push {dst_mode}
    // Push ARG(dst), the destination pointer.
    push edi
    // Call the generic check strings function.
    call agent::asan::CheckStringsMemoryAccesses
    add esp, 36
    // Epilogue, restore context.
    popad
    popfd
    ret
  }}
}}
"#;

/// Redirector stub for one string-operation accessor.
pub const STRING_REDIRECT_FUNCTION: &str = r#"asan_redirect{prefix}{access_size}_byte_{func}_access LABEL PROC
  call asan_redirect_tail"#;

/// Public declaration for one string-operation redirector label.
pub const STRING_REDIRECT_FUNCTION_DECL: &str =
    r#"PUBLIC asan_redirect{prefix}{access_size}_byte_{func}_access"#;

/// The fixed macro registry consulted by every render call.
pub fn builtin_macros() -> MacroRegistry {
    let mut macros = MacroRegistry::new();
    macros.insert("AsanSaveEflags", SAVE_EFLAGS);
    macros.insert("AsanRestoreEflags", RESTORE_EFLAGS);
    macros.insert("AsanFastPath", FAST_PATH);
    macros.insert("AsanSlowPath", SLOW_PATH);
    macros.insert("AsanErrorPath", ERROR_PATH);
    macros
}
